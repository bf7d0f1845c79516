//! Checkout form and shipping details.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum card number length (spaces ignored).
pub const MIN_CARD_DIGITS: usize = 12;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Tarjeta,
    Paypal,
    Efectivo,
    /// Anything else found in stored orders.
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Tarjeta => "tarjeta",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Tarjeta => "Tarjeta",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Other => "Otro",
        }
    }

    /// Whether a card number must be supplied.
    pub fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::Tarjeta)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping and payment details recorded on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub ciudad: String,
    /// Postal code.
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub metodo: PaymentMethod,
}

/// What the shopper typed into the checkout form.
///
/// The card number is only used for validation and never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub nombre: String,
    pub direccion: String,
    pub ciudad: String,
    pub codigo: String,
    pub metodo: PaymentMethod,
    pub tarjeta: String,
}

impl CheckoutForm {
    /// Check every shipping field is filled and, for card payments, that the
    /// card number is long enough.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let blank = [&self.nombre, &self.direccion, &self.ciudad, &self.codigo]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(CommerceError::ValidationError(
                "Completa todos los campos de envío.".to_string(),
            ));
        }

        if self.metodo.requires_card() {
            let digits = self.tarjeta.chars().filter(|c| !c.is_whitespace()).count();
            if digits < MIN_CARD_DIGITS {
                return Err(CommerceError::ValidationError(
                    "Introduce un número de tarjeta válido (simulado).".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The details that go on the order.
    pub fn customer(&self) -> Customer {
        Customer {
            nombre: self.nombre.clone(),
            direccion: self.direccion.clone(),
            ciudad: self.ciudad.clone(),
            codigo: self.codigo.clone(),
            metodo: self.metodo,
        }
    }
}
