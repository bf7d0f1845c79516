//! Commerce error types.
//!
//! Messages are shopper-facing, so they are written in Spanish.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the stock list or catalog.
    #[error("Producto no encontrado: {0}")]
    ProductNotFound(String),

    /// Not enough stock left for the requested quantity.
    #[error("No hay suficiente stock para {product_id}: solicitado {requested}, disponible {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Cantidad inválida: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("El carrito está vacío")]
    EmptyCart,

    /// Form or input validation failed.
    #[error("{0}")]
    ValidationError(String),

    /// The payment processor declined the charge.
    #[error("{0}")]
    PaymentDeclined(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persisted store error.
    #[error("Cache error: {0}")]
    CacheError(#[from] tienda_store::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
