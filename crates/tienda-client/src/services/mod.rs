//! Typed wrappers over the backend resources.

mod blogs;
mod orders;
mod products;

pub use blogs::BlogsApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;
