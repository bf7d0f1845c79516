//! Typed JSON layer over a raw [`Storage`].

use crate::{CacheError, Storage};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`Storage`] backend.
///
/// Values are stored as JSON text, the way the browser app stored them with
/// `JSON.stringify`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: Storage> Cache<S> {
    /// Wrap a storage backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying raw store.
    pub fn storage(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartItem>> = cache.get(keys::CART)?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when the key is missing
    /// or holds something that doesn't parse as `T`.
    ///
    /// Only storage failures are reported; parse failures are logged.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, CacheError> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unparsable stored value");
                Ok(T::default())
            }
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key, &raw)
    }

    /// Read the raw string stored under `key`, without parsing.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get_item(key)
    }

    /// Store a raw string under `key`, without encoding.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store.set_item(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove_item(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get_item(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Remove every key.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.clear()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", user_id);
/// // Returns "cart:user123"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
