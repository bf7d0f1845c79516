//! Product catalog module.
//!
//! Contains the product record, the bundled seed catalog and the
//! store-backed repository.

mod product;
mod repository;
mod seed;

pub use product::{normalize_fields, Product, ProductDraft, ProductPatch, DEFAULT_IMAGE};
pub use repository::ProductRepository;
pub use seed::seed_products;
