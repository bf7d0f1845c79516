//! Locally persisted product catalog.

use crate::catalog::{normalize_fields, seed_products, Product, ProductDraft, ProductPatch};
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde_json::{Map, Value};
use tienda_store::{keys, Cache, Storage};

/// Product catalog backed by the store.
///
/// The seed catalog is never written back on its own; `products_list` holds
/// the products that were created or edited locally, and reads merge those
/// over the seed by id.
pub struct ProductRepository<S> {
    cache: Cache<S>,
    seed: Vec<Product>,
}

impl<S: Storage> ProductRepository<S> {
    /// Open the repository over the bundled seed catalog.
    pub fn new(store: S) -> Self {
        Self::with_seed(store, seed_products())
    }

    /// Open the repository over a custom seed catalog.
    pub fn with_seed(store: S, seed: Vec<Product>) -> Self {
        Self {
            cache: Cache::new(store),
            seed,
        }
    }

    /// Raw stored product objects, or nothing when the key is missing or
    /// unreadable.
    fn read_stored(&self) -> Result<Vec<Value>, CommerceError> {
        let Some(raw) = self.cache.get_raw(keys::PRODUCTS_LIST)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::error!(error = %e, "stored product list is unreadable; using seed only");
                Ok(Vec::new())
            }
        }
    }

    /// All products: the seed merged with stored products by id.
    ///
    /// Stored fields override seed fields one by one; stored-only products
    /// are appended in stored order. Stored entries without an id are skipped.
    pub fn get_products(&self) -> Result<Vec<Product>, CommerceError> {
        let mut merged: Vec<(String, Map<String, Value>)> = Vec::with_capacity(self.seed.len());
        for product in &self.seed {
            if let Value::Object(object) = serde_json::to_value(product)? {
                merged.push((product.id.to_string(), object));
            }
        }

        for stored in self.read_stored()? {
            let Value::Object(mut object) = stored else {
                continue;
            };
            let Some(id) = object.get("id").and_then(id_key) else {
                continue;
            };
            normalize_fields(&mut object);
            match merged.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, base)) => base.extend(object),
                None => merged.push((id, object)),
            }
        }

        let mut products = Vec::with_capacity(merged.len());
        for (id, object) in merged {
            match serde_json::from_value::<Product>(Value::Object(object)) {
                Ok(product) => products.push(product),
                Err(e) => tracing::warn!(id = %id, error = %e, "skipping malformed product"),
            }
        }
        Ok(products)
    }

    /// Replace the stored product list.
    pub fn save_products(&self, products: &[Product]) -> Result<(), CommerceError> {
        self.cache.set(keys::PRODUCTS_LIST, products)?;
        Ok(())
    }

    /// Highest `p<digits>` suffix across seed and stored products.
    fn max_numeric_id(&self) -> Result<u64, CommerceError> {
        let seed_ids = self.seed.iter().map(|p| p.id.to_string());
        let stored_ids = self
            .read_stored()?
            .into_iter()
            .filter_map(|v| v.get("id").and_then(id_key));
        Ok(seed_ids
            .chain(stored_ids)
            .filter_map(|id| numeric_suffix(&id))
            .max()
            .unwrap_or(0))
    }

    fn read_counter(&self) -> Result<Option<u64>, CommerceError> {
        Ok(self
            .cache
            .get_raw(keys::PRODUCT_COUNTER)?
            .and_then(|raw| raw.trim().parse::<u64>().ok()))
    }

    /// Hand out the next `p{n}` id.
    ///
    /// The counter is first raised to the highest existing `p<digits>` id so
    /// ids never collide with products added by other means.
    pub fn next_id(&self) -> Result<ProductId, CommerceError> {
        let max = self.max_numeric_id()?;
        let current = match self.read_counter()? {
            Some(current) if current >= max => current,
            _ => {
                self.cache.set_raw(keys::PRODUCT_COUNTER, &max.to_string())?;
                max
            }
        };
        let next = current + 1;
        self.cache.set_raw(keys::PRODUCT_COUNTER, &next.to_string())?;
        Ok(ProductId::new(format!("p{next}")))
    }

    /// Normalize a draft, assign an id if needed, and persist it.
    pub fn add_product(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        let mut products = self.get_products()?;
        let id = if draft.needs_id() {
            Some(self.next_id()?)
        } else {
            None
        };
        let product = draft.into_product(|| id.unwrap_or_default());
        products.push(product.clone());
        self.save_products(&products)?;
        tracing::debug!(id = %product.id, "product added");
        Ok(product)
    }

    /// Look up a product by id.
    pub fn get_product_by_id(&self, id: &str) -> Result<Option<Product>, CommerceError> {
        Ok(self.get_products()?.into_iter().find(|p| p.id.as_str() == id))
    }

    /// Merge `patch` into the product with `id`.
    ///
    /// Returns `None` (and writes nothing) when no product has that id.
    pub fn update_product(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, CommerceError> {
        let mut products = self.get_products()?;
        let Some(product) = products.iter_mut().find(|p| p.id.as_str() == id) else {
            tracing::warn!(id, "update requested for unknown product");
            return Ok(None);
        };
        patch.apply_to(product);
        let updated = product.clone();
        self.save_products(&products)?;
        Ok(Some(updated))
    }

    /// Remove the product with `id` from the stored list.
    ///
    /// Seed products come back on the next read; only locally added products
    /// disappear for good.
    pub fn delete_product(&self, id: &str) -> Result<(), CommerceError> {
        let products: Vec<Product> = self
            .get_products()?
            .into_iter()
            .filter(|p| p.id.as_str() != id)
            .collect();
        self.save_products(&products)
    }

    /// Products in a category (case-insensitive).
    pub fn by_category(&self, categoria: &str) -> Result<Vec<Product>, CommerceError> {
        let wanted = categoria.to_lowercase();
        Ok(self
            .get_products()?
            .into_iter()
            .filter(|p| p.categoria.to_lowercase() == wanted)
            .collect())
    }

    /// Products flagged as on sale.
    pub fn on_sale(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.get_products()?.into_iter().filter(|p| p.oferta).collect())
    }

    /// Distinct non-empty category names, in first-seen order.
    pub fn categories(&self) -> Result<Vec<String>, CommerceError> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.get_products()? {
            if !product.categoria.is_empty() && !categories.contains(&product.categoria) {
                categories.push(product.categoria);
            }
        }
        Ok(categories)
    }
}

/// Id of a raw object as a lookup key. `null` ids don't count.
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `p12` / `P12` -> 12.
fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.strip_prefix('p').or_else(|| id.strip_prefix('P'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_store::MemoryStorage;

    fn repo() -> ProductRepository<MemoryStorage> {
        ProductRepository::new(MemoryStorage::new())
    }

    #[test]
    fn test_seed_only() {
        let products = repo().get_products().unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0].id.as_str(), "p1");
    }

    #[test]
    fn test_stored_fields_override_seed() {
        let store = MemoryStorage::with_entries([(
            keys::PRODUCTS_LIST,
            r#"[{"id":"p1","precio":10},{"id":"p99","name":"Nuevo","price":"3.5"}]"#,
        )]);
        let repo = ProductRepository::new(store);
        let products = repo.get_products().unwrap();

        assert_eq!(products.len(), 5);
        let p1 = &products[0];
        assert_eq!(p1.precio, 10.0);
        assert_eq!(p1.nombre, "Auriculares Gamer X");
        assert_eq!(p1.stock, 15);

        let p99 = &products[4];
        assert_eq!(p99.nombre, "Nuevo");
        assert_eq!(p99.precio, 3.5);
    }

    #[test]
    fn test_unreadable_store_falls_back_to_seed() {
        let store = MemoryStorage::with_entries([(keys::PRODUCTS_LIST, "not json")]);
        let products = ProductRepository::new(store).get_products().unwrap();
        assert_eq!(products.len(), 4);
    }

    #[test]
    fn test_save_get_roundtrip_is_idempotent() {
        let repo = repo();
        repo.add_product(ProductDraft {
            nombre: Some("Mouse".into()),
            precio: Some(19.9),
            ..Default::default()
        })
        .unwrap();

        let first = repo.get_products().unwrap();
        repo.save_products(&first).unwrap();
        let second = repo.get_products().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_id_syncs_with_existing_ids() {
        let store = MemoryStorage::with_entries([
            (keys::PRODUCTS_LIST, r#"[{"id":"p10"},{"id":"px"}]"#),
            (keys::PRODUCT_COUNTER, "2"),
        ]);
        let repo = ProductRepository::new(store);
        assert_eq!(repo.next_id().unwrap().as_str(), "p11");
        assert_eq!(repo.next_id().unwrap().as_str(), "p12");
    }

    #[test]
    fn test_next_id_recovers_from_garbage_counter() {
        let store = MemoryStorage::with_entries([(keys::PRODUCT_COUNTER, "abc")]);
        let repo = ProductRepository::new(store);
        assert_eq!(repo.next_id().unwrap().as_str(), "p5");
    }

    #[test]
    fn test_add_product_assigns_id_and_defaults() {
        let repo = repo();
        let p = repo
            .add_product(ProductDraft {
                nombre: Some("Monitor".into()),
                stock: Some(0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(p.id.as_str(), "p5");
        assert_eq!(p.imagen.as_deref(), Some("Starmie.jpg"));
        assert_eq!(p.stock, 0);
        assert_eq!(repo.get_product_by_id("p5").unwrap(), Some(p));
    }

    #[test]
    fn test_update_only_persists_when_found() {
        let repo = repo();
        let patch = ProductPatch {
            stock: Some(1),
            ..Default::default()
        };
        assert!(repo.update_product("nope", &patch).unwrap().is_none());
        assert!(!repo.cache.exists(keys::PRODUCTS_LIST).unwrap());

        let updated = repo.update_product("p3", &patch).unwrap().unwrap();
        assert_eq!(updated.stock, 1);
        assert_eq!(repo.get_product_by_id("p3").unwrap().unwrap().stock, 1);
    }

    #[test]
    fn test_delete_local_product() {
        let repo = repo();
        let p = repo.add_product(ProductDraft::default()).unwrap();
        repo.delete_product(p.id.as_str()).unwrap();
        assert!(repo.get_product_by_id(p.id.as_str()).unwrap().is_none());
    }

    #[test]
    fn test_filters() {
        let repo = repo();
        assert_eq!(repo.by_category("accesorios").unwrap().len(), 2);
        assert_eq!(repo.on_sale().unwrap().len(), 1);
        assert_eq!(repo.categories().unwrap(), vec!["Accesorios", "Sillas", "Otros"]);
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("p12"), Some(12));
        assert_eq!(numeric_suffix("P3"), Some(3));
        assert_eq!(numeric_suffix("p"), None);
        assert_eq!(numeric_suffix("p1a"), None);
        assert_eq!(numeric_suffix("x1"), None);
    }
}
