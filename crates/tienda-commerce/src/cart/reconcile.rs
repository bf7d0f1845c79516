//! Cart and stock reconciliation.
//!
//! The cart keeps a parallel copy of the product list whose `stock` counts
//! drop as units go into the cart and rise again when they come out. Every
//! operation here is pure: it reads a [`CartState`] and returns a new one,
//! or an error with the input left as it was.

use crate::cart::{calculate_total, CartItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use std::collections::HashMap;

/// Cart lines together with the stock list they were taken from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub products: Vec<Product>,
}

impl CartState {
    /// Pair cart lines with a stock list.
    pub fn new(items: Vec<CartItem>, products: Vec<Product>) -> Self {
        Self { items, products }
    }

    fn stock_of(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Products with `stock` shifted by `delta` for one id.
    fn shift_stock(&self, id: &ProductId, delta: i64) -> Vec<Product> {
        self.products
            .iter()
            .map(|p| {
                if &p.id == id {
                    Product {
                        stock: p.stock.saturating_add(delta),
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect()
    }

    /// Add `qty` units of `product`.
    ///
    /// The product must be in the stock list, `qty` must be positive, and the
    /// remaining stock must cover `qty`; when the product is already in the
    /// cart, it must also cover the existing quantity plus `qty`.
    pub fn add_to_cart(&self, product: &Product, qty: i64) -> Result<Self, CommerceError> {
        let in_stock = self
            .stock_of(&product.id)
            .ok_or_else(|| CommerceError::ProductNotFound(product.id.to_string()))?;

        if qty <= 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }

        let insufficient = |requested: i64| CommerceError::InsufficientStock {
            product_id: product.id.to_string(),
            requested,
            available: in_stock.stock,
        };

        if in_stock.stock < qty {
            return Err(insufficient(qty));
        }

        let items = match self.item(&product.id) {
            Some(found) => {
                let wanted = found.qty.saturating_add(qty);
                if in_stock.stock < wanted {
                    return Err(insufficient(wanted));
                }
                self.items
                    .iter()
                    .map(|i| {
                        if i.id() == &product.id {
                            CartItem::new(i.product.clone(), wanted)
                        } else {
                            i.clone()
                        }
                    })
                    .collect()
            }
            None => {
                let mut items = self.items.clone();
                items.push(CartItem::new(product.clone(), qty));
                items
            }
        };

        Ok(Self {
            items,
            products: self.shift_stock(&product.id, -qty),
        })
    }

    /// Drop the line for `id` and put its units back in stock.
    ///
    /// Unknown ids leave the state unchanged.
    pub fn remove_from_cart(&self, id: &ProductId) -> Self {
        let Some(removed) = self.item(id) else {
            return self.clone();
        };
        Self {
            items: self.items.iter().filter(|i| i.id() != id).cloned().collect(),
            products: self.shift_stock(id, removed.qty),
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// The stock check uses the requested change; the applied quantity is
    /// floored at 1 and stock moves by the applied change.
    pub fn update_qty(&self, id: &ProductId, new_qty: i64) -> Result<Self, CommerceError> {
        let Some(current) = self.item(id) else {
            return Ok(self.clone());
        };
        let in_stock = self
            .stock_of(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;

        let delta = new_qty
            .checked_sub(current.qty)
            .ok_or(CommerceError::InvalidQuantity(new_qty))?;
        if in_stock.stock < delta {
            return Err(CommerceError::InsufficientStock {
                product_id: id.to_string(),
                requested: new_qty,
                available: in_stock.stock.saturating_add(current.qty),
            });
        }

        let validated = new_qty.max(1);
        let applied = validated
            .checked_sub(current.qty)
            .ok_or(CommerceError::InvalidQuantity(new_qty))?;

        Ok(Self {
            items: self
                .items
                .iter()
                .map(|i| {
                    if i.id() == id {
                        CartItem::new(i.product.clone(), validated)
                    } else {
                        i.clone()
                    }
                })
                .collect(),
            products: self.shift_stock(id, -applied),
        })
    }

    /// Pair stored cart lines with a fresh stock list, taking the units
    /// already in the cart out of stock.
    pub fn reconciled(items: Vec<CartItem>, products: Vec<Product>) -> Self {
        let products = reserve_stock(&items, &products);
        Self { items, products }
    }

    /// Return the units of `items` to stock. Cart lines are left alone.
    pub fn restore_stock(&self, items: &[CartItem]) -> Self {
        Self {
            items: self.items.clone(),
            products: restore_stock(items, &self.products),
        }
    }

    /// Empty the cart after a successful order. Stock stays where it is,
    /// since the units were sold.
    pub fn clear_cart_on_success(&self) -> Self {
        Self {
            items: Vec::new(),
            products: self.products.clone(),
        }
    }

    /// `sum(precio * qty)` over the cart.
    pub fn total(&self) -> Result<Money, CommerceError> {
        calculate_total(&self.items)
    }
}

/// Add each item's quantity back to the matching product's stock.
///
/// Duplicate ids in `items` are summed first; products with nothing to
/// restore are returned unchanged.
pub fn restore_stock(items: &[CartItem], products: &[Product]) -> Vec<Product> {
    let mut restore: HashMap<&ProductId, i64> = HashMap::new();
    for item in items {
        *restore.entry(item.id()).or_insert(0) += item.qty.max(0);
    }

    products
        .iter()
        .map(|p| match restore.get(&p.id) {
            Some(&qty) if qty != 0 => Product {
                stock: p.stock.saturating_add(qty),
                ..p.clone()
            },
            _ => p.clone(),
        })
        .collect()
}

/// Take each item's quantity out of the matching product's stock.
///
/// The inverse of [`restore_stock`].
pub fn reserve_stock(items: &[CartItem], products: &[Product]) -> Vec<Product> {
    let mut reserve: HashMap<&ProductId, i64> = HashMap::new();
    for item in items {
        let entry = reserve.entry(item.id()).or_insert(0);
        *entry = entry.saturating_add(item.qty.max(0));
    }

    products
        .iter()
        .map(|p| match reserve.get(&p.id) {
            Some(&qty) if qty != 0 => Product {
                stock: p.stock.saturating_sub(qty),
                ..p.clone()
            },
            _ => p.clone(),
        })
        .collect()
}
