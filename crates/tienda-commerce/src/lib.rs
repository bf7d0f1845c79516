//! Catalog, cart and checkout logic for the Tienda storefront.
//!
//! - **Catalog**: products, the bundled seed catalog, the local repository
//! - **Cart**: cart lines, pricing, stock reconciliation, the persisted cart
//! - **Checkout**: form validation, simulated payment, orders (boletas)
//! - **Blog**: posts and their bundled fallback
//! - **Display**: formatting helpers for prices, images and dates
//!
//! Everything that persists goes through a [`tienda_store::Storage`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_commerce::prelude::*;
//! use tienda_store::MemoryStorage;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStorage::new());
//! let products = ProductRepository::new(Arc::clone(&store)).get_products()?;
//!
//! let mut cart = CartProvider::open(Arc::clone(&store), products.clone())?;
//! cart.add_to_cart(&products[0], 2)?;
//! println!("Total: {}", cart.total()?);
//!
//! let checkout = Checkout::new(store, SimulatedPayment::default());
//! let order = checkout.place_order(&mut cart, &form, None).await?;
//! ```

pub mod error;
pub mod ids;
mod lenient;
pub mod money;

pub mod blog;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod display;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Product, ProductDraft, ProductPatch, ProductRepository};

    // Cart
    pub use crate::cart::{CartItem, CartPricing, CartProvider, CartState};

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutForm, Customer, Order, OrderRepository, OrderStatus, PaymentMethod,
        PaymentProcessor, SimulatedPayment,
    };

    // Blog
    pub use crate::blog::BlogPost;
}
