//! Store-backed cart.

use crate::cart::{CartItem, CartState};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use tienda_store::{keys, Cache, Storage};

/// A cart that persists its lines under the `cart` key after every change.
///
/// Stock lives only in memory: the provider is handed the catalog product
/// list when it is opened, takes the stored lines out of it, and adjusts its
/// own copy from there.
pub struct CartProvider<S> {
    cache: Cache<S>,
    state: CartState,
}

impl<S: Storage> CartProvider<S> {
    /// Load the stored cart and pair it with `products` for stock checks.
    ///
    /// `products` carries catalog stock; the units of the stored lines are
    /// subtracted from it. An unreadable stored cart starts empty.
    pub fn open(store: S, products: Vec<Product>) -> Result<Self, CommerceError> {
        let cache = Cache::new(store);
        let items: Vec<CartItem> = cache.get_or_default(keys::CART)?;
        tracing::debug!(lines = items.len(), "cart loaded");
        Ok(Self {
            cache,
            state: CartState::reconciled(items, products),
        })
    }

    fn commit(&mut self, next: CartState) -> Result<(), CommerceError> {
        self.cache.set(keys::CART, &next.items)?;
        self.state = next;
        Ok(())
    }

    /// Lines currently in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// The in-memory stock list.
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    /// Current cart and stock state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Total units in the cart.
    pub fn item_count(&self) -> i64 {
        self.state.items.iter().map(|i| i.qty).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// See [`CartState::add_to_cart`].
    pub fn add_to_cart(&mut self, product: &Product, qty: i64) -> Result<(), CommerceError> {
        let next = self.state.add_to_cart(product, qty)?;
        self.commit(next)
    }

    /// See [`CartState::remove_from_cart`].
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        let next = self.state.remove_from_cart(id);
        self.commit(next)
    }

    /// See [`CartState::update_qty`].
    pub fn update_qty(&mut self, id: &ProductId, qty: i64) -> Result<(), CommerceError> {
        let next = self.state.update_qty(id, qty)?;
        self.commit(next)
    }

    /// Empty the cart and put every unit back in stock.
    pub fn clear_cart(&mut self) -> Result<(), CommerceError> {
        let restored = self.state.restore_stock(&self.state.items);
        self.commit(restored.clear_cart_on_success())
    }

    /// Empty the cart after a paid order, leaving stock as it is.
    pub fn clear_cart_on_success(&mut self) -> Result<(), CommerceError> {
        let next = self.state.clear_cart_on_success();
        self.commit(next)
    }

    /// `sum(precio * qty)` over the cart.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.state.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tienda_store::MemoryStorage;

    fn products() -> Vec<Product> {
        vec![
            Product::new("p1", "Teclado", 20.0).with_stock(3),
            Product::new("p2", "Mouse", 7.5).with_stock(10),
        ]
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = Arc::new(MemoryStorage::new());
        let mut cart = CartProvider::open(Arc::clone(&store), products()).unwrap();
        let p1 = cart.products()[0].clone();
        cart.add_to_cart(&p1, 2).unwrap();

        let reopened = CartProvider::open(store, products()).unwrap();
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.items()[0].qty, 2);
        assert_eq!(reopened.products()[0].stock, 1);
    }

    #[test]
    fn test_reopen_with_catalog_stock_then_clear() {
        let store = Arc::new(MemoryStorage::new());
        let mut cart = CartProvider::open(Arc::clone(&store), products()).unwrap();
        let p1 = cart.products()[0].clone();
        cart.add_to_cart(&p1, 3).unwrap();

        let mut reopened = CartProvider::open(Arc::clone(&store), products()).unwrap();
        assert_eq!(reopened.item_count(), 3);
        assert_eq!(reopened.products()[0].stock, 0);
        assert!(reopened.add_to_cart(&p1, 1).is_err());

        reopened.clear_cart().unwrap();
        assert!(reopened.is_empty());
        assert_eq!(reopened.products()[0].stock, 3);
        assert_eq!(reopened.products()[1].stock, 10);
    }

    #[test]
    fn test_failed_mutation_keeps_state() {
        let store = Arc::new(MemoryStorage::new());
        let mut cart = CartProvider::open(Arc::clone(&store), products()).unwrap();
        let p1 = cart.products()[0].clone();
        assert!(cart.add_to_cart(&p1, 4).is_err());
        assert!(cart.is_empty());
        assert_eq!(cart.products()[0].stock, 3);
        assert!(store.get_item(keys::CART).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_stored_cart_starts_empty() {
        let store = MemoryStorage::with_entries([(keys::CART, "{{{")]);
        let cart = CartProvider::open(store, products()).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_cart_restores_stock() {
        let mut cart = CartProvider::open(MemoryStorage::new(), products()).unwrap();
        let p1 = cart.products()[0].clone();
        let p2 = cart.products()[1].clone();
        cart.add_to_cart(&p1, 3).unwrap();
        cart.add_to_cart(&p2, 4).unwrap();
        assert_eq!(cart.item_count(), 7);

        cart.clear_cart().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.products()[0].stock, 3);
        assert_eq!(cart.products()[1].stock, 10);
    }

    #[test]
    fn test_clear_on_success_keeps_stock_sold() {
        let mut cart = CartProvider::open(MemoryStorage::new(), products()).unwrap();
        let p2 = cart.products()[1].clone();
        cart.add_to_cart(&p2, 4).unwrap();
        cart.clear_cart_on_success().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.products()[1].stock, 6);
    }

    #[test]
    fn test_update_remove_and_total() {
        let mut cart = CartProvider::open(MemoryStorage::new(), products()).unwrap();
        let p1 = cart.products()[0].clone();
        let p2 = cart.products()[1].clone();
        cart.add_to_cart(&p1, 1).unwrap();
        cart.add_to_cart(&p2, 2).unwrap();
        cart.update_qty(&p1.id, 2).unwrap();
        assert_eq!(cart.total().unwrap().to_decimal(), 55.0);

        cart.remove_from_cart(&p2.id).unwrap();
        assert_eq!(cart.total().unwrap().to_decimal(), 40.0);
        assert_eq!(cart.products()[1].stock, 10);
    }
}
