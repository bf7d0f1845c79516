//! Cart pricing calculations.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line pricing.
    pub line_items: Vec<LineItemPricing>,
    /// Total units across lines.
    pub item_count: i64,
    /// Sum of every line subtotal.
    pub grand_total: Money,
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity
    pub subtotal: Money,
}

/// Price every line and sum the cart.
///
/// Returns error if arithmetic overflow occurs.
pub fn calculate_pricing(items: &[CartItem]) -> Result<CartPricing, CommerceError> {
    let line_items = items
        .iter()
        .map(|item| {
            Ok(LineItemPricing {
                product_id: item.id().clone(),
                unit_price: item.product.price(),
                quantity: item.qty,
                subtotal: item.subtotal()?,
            })
        })
        .collect::<Result<Vec<_>, CommerceError>>()?;

    let grand_total =
        Money::try_sum(line_items.iter().map(|l| &l.subtotal)).ok_or(CommerceError::Overflow)?;

    Ok(CartPricing {
        item_count: items.iter().map(|i| i.qty).sum(),
        line_items,
        grand_total,
    })
}

/// `sum(precio * qty)` over the cart. An empty cart totals zero.
pub fn calculate_total(items: &[CartItem]) -> Result<Money, CommerceError> {
    calculate_pricing(items).map(|p| p.grand_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    #[test]
    fn test_total_of_mixed_prices() {
        let items = vec![
            CartItem::new(Product::new("a", "A", 10.0), 2),
            CartItem::new(Product::new("b", "B", 5.5), 1),
        ];
        let total = calculate_total(&items).unwrap();
        assert_eq!(total.to_decimal(), 25.5);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert!(calculate_total(&[]).unwrap().is_zero());
    }

    #[test]
    fn test_pricing_breakdown() {
        let items = vec![
            CartItem::new(Product::new("a", "A", 1.25), 4),
            CartItem::new(Product::new("b", "B", 0.1), 3),
        ];
        let pricing = calculate_pricing(&items).unwrap();
        assert_eq!(pricing.item_count, 7);
        assert_eq!(pricing.line_items[0].subtotal.amount_cents, 500);
        assert_eq!(pricing.line_items[1].subtotal.amount_cents, 30);
        assert_eq!(pricing.grand_total.amount_cents, 530);
    }

    #[test]
    fn test_overflow_is_reported() {
        let items = vec![CartItem::new(Product::new("a", "A", 1e17), i64::MAX)];
        assert!(matches!(
            calculate_total(&items),
            Err(CommerceError::Overflow)
        ));
    }
}
