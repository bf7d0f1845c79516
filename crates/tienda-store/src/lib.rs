//! Persisted key-value store for the Tienda storefront.
//!
//! Stands in for the browser's `localStorage`: a [`Storage`] backend holds
//! raw strings, and [`Cache`] layers typed JSON access on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_store::{keys, Cache, FileStorage};
//!
//! let cache = Cache::new(FileStorage::open(".tienda/store.json")?);
//!
//! // Store a value
//! cache.set(keys::CART, &items)?;
//!
//! // Retrieve a value
//! let cart: Option<Vec<CartItem>> = cache.get(keys::CART)?;
//!
//! // Delete a value
//! cache.delete(keys::CART)?;
//! ```

mod error;
pub mod keys;
mod kv;
mod storage;

pub use error::CacheError;
pub use kv::Cache;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{keys, Cache, CacheError, FileStorage, MemoryStorage, Storage};
}
