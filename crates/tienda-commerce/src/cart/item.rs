//! Cart line items.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::lenient;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the cart: every product field plus the quantity.
///
/// Stored flat, the same shape as the product record with a `qty` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart.
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub qty: i64,
}

impl CartItem {
    /// Put `qty` units of `product` in a new line.
    pub fn new(product: Product, qty: i64) -> Self {
        Self { product, qty }
    }

    /// The product id.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `precio * qty`, in cents.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.product
            .price()
            .try_multiply(self.qty)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_is_stored_flat() {
        let item = CartItem::new(Product::new("p1", "Mouse", 9.5).with_stock(3), 2);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["nombre"], "Mouse");
        assert_eq!(value["qty"], 2);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_item_reads_legacy_shape() {
        let item: CartItem =
            serde_json::from_str(r#"{"id":"p2","title":"Silla","price":100,"qty":"3"}"#).unwrap();
        assert_eq!(item.id().as_str(), "p2");
        assert_eq!(item.product.nombre, "Silla");
        assert_eq!(item.qty, 3);
    }

    #[test]
    fn test_subtotal() {
        let item = CartItem::new(Product::new("p1", "Cable", 5.5), 3);
        assert_eq!(item.subtotal().unwrap().amount_cents, 1650);
    }
}
