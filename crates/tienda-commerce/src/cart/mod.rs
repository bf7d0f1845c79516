//! Shopping cart module.
//!
//! Contains cart lines, pricing, the pure stock reconciliation rules and the
//! store-backed cart provider.

mod item;
mod pricing;
mod provider;
mod reconcile;

pub use item::CartItem;
pub use pricing::{calculate_pricing, calculate_total, CartPricing, LineItemPricing};
pub use provider::CartProvider;
pub use reconcile::{reserve_stock, restore_stock, CartState};
