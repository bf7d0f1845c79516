//! Order (boleta) types.

use crate::cart::CartItem;
use crate::checkout::Customer;
use crate::ids::{current_timestamp_millis, OrderId};
use crate::lenient;
use crate::money::Money;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Message recorded on orders the simulated processor turns down.
pub const DECLINED_MESSAGE: &str = "Pago rechazado por el procesador (simulado).";

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, payment not settled yet.
    #[default]
    Pending,
    /// Paid.
    Success,
    /// Payment declined.
    Failed,
    /// Any status this client doesn't know.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Failed => "failed",
            OrderStatus::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Success => "Pagada",
            OrderStatus::Failed => "Rechazada",
            OrderStatus::Unknown => "Desconocido",
        }
    }

    /// Check if the order is settled one way or the other.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Success | OrderStatus::Failed)
    }
}

/// A placed order, the record shown on the receipt (boleta).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `order_{number}` for orders placed locally.
    pub id: OrderId,
    /// Sequential order number.
    #[serde(default)]
    pub number: u64,
    /// `Orden N°{number}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total: f64,
    /// Email of the logged-in buyer, if any.
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Why the order failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Order {
    /// A pending order numbered `number`, stamped now.
    pub fn new(
        number: u64,
        customer: Customer,
        items: Vec<CartItem>,
        total: Money,
        user_email: Option<String>,
    ) -> Self {
        Self {
            id: OrderId::new(format!("order_{number}")),
            number,
            display_id: Some(format!("Orden N°{number}")),
            created_at: Some(current_timestamp_millis()),
            customer,
            items,
            total: total.to_decimal(),
            user_email,
            status: OrderStatus::Pending,
            error: None,
        }
    }

    /// Mark the order as paid.
    pub fn mark_success(&mut self) {
        self.status = OrderStatus::Success;
        self.error = None;
    }

    /// Mark the order as declined with a reason.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = OrderStatus::Failed;
        self.error = Some(reason.into());
    }

    /// Receipt heading: the display id, falling back to the raw id.
    pub fn display_id(&self) -> &str {
        self.display_id
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Creation time in the local time zone, or `""` when unknown.
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    /// Creation time rendered as `dd-mm-yyyy, HH:MM:SS` in `tz`.
    pub fn formatted_date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.created_at
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|at| at.with_timezone(tz).format("%d-%m-%Y, %H:%M:%S").to_string())
            .unwrap_or_default()
    }

    /// Total units across lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }
}
