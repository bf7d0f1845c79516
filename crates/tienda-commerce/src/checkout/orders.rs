//! Locally stored order history.

use crate::checkout::Order;
use crate::error::CommerceError;
use serde_json::Value;
use tienda_store::{keys, Cache, Storage};

/// Order history kept in the store.
///
/// Older builds saved the history under different keys, so the first
/// candidate key that holds a JSON array is used; with none found, orders go
/// under `boletas`.
pub struct OrderRepository<S> {
    cache: Cache<S>,
}

impl<S: Storage> OrderRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
        }
    }

    /// The first candidate key holding an array, if any.
    pub fn detect_key(&self) -> Result<Option<&'static str>, CommerceError> {
        for &key in keys::ORDER_KEY_CANDIDATES {
            let Some(raw) = self.cache.get_raw(key)? else {
                continue;
            };
            if matches!(serde_json::from_str::<Value>(&raw), Ok(Value::Array(_))) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    fn key_to_use(&self) -> Result<&'static str, CommerceError> {
        Ok(self.detect_key()?.unwrap_or(keys::BOLETAS))
    }

    fn read_raw(&self, key: &str) -> Result<Vec<Value>, CommerceError> {
        let Some(raw) = self.cache.get_raw(key)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str::<Vec<Value>>(&raw)?)
    }

    /// Every stored order. Entries that don't parse as orders are skipped,
    /// and an unreadable history reads as empty.
    pub fn get_orders(&self) -> Result<Vec<Order>, CommerceError> {
        let key = self.key_to_use()?;
        let list = match self.read_raw(key) {
            Ok(list) => list,
            Err(CommerceError::SerializationError(e)) => {
                tracing::error!(key, error = %e, "order history is unreadable");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(list
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Order>(value) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!(key, error = %e, "skipping malformed order");
                    None
                }
            })
            .collect())
    }

    /// Append an order to the history.
    ///
    /// Existing entries are written back exactly as they were read. An
    /// unreadable history is left untouched and the save fails.
    pub fn save_order(&self, order: &Order) -> Result<(), CommerceError> {
        let key = self.key_to_use()?;
        let mut list = self.read_raw(key).inspect_err(|e| {
            tracing::error!(key, error = %e, "order history is unreadable, order not saved");
        })?;
        list.push(serde_json::to_value(order)?);
        self.cache.set(key, &list)?;
        tracing::debug!(key, order = %order.id, "order saved");
        Ok(())
    }

    /// Drop the order history.
    pub fn clear_orders(&self) -> Result<(), CommerceError> {
        let key = self.key_to_use()?;
        self.cache.delete(key)?;
        Ok(())
    }

    /// Number of stored orders.
    pub fn count(&self) -> Result<usize, CommerceError> {
        Ok(self.get_orders()?.len())
    }

    /// Orders placed by `email`. An empty email matches nothing.
    pub fn by_user_email(&self, email: &str) -> Result<Vec<Order>, CommerceError> {
        if email.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .get_orders()?
            .into_iter()
            .filter(|o| o.user_email.as_deref() == Some(email))
            .collect())
    }

    /// Look up an order by id or display id.
    pub fn get_order(&self, id: &str) -> Result<Option<Order>, CommerceError> {
        Ok(self
            .get_orders()?
            .into_iter()
            .find(|o| o.id.as_str() == id || o.display_id.as_deref() == Some(id)))
    }
}
