//! Remote catalog with a local fallback.

use crate::{ApiClient, HttpTransport};
use tienda_commerce::blog::{seed_posts, BlogPost};
use tienda_commerce::catalog::{Product, ProductRepository};
use tienda_commerce::{CommerceError, ProductId};
use tienda_store::Storage;

/// Reads the catalog from the backend, falling back to the locally stored
/// catalog whenever the backend can't be reached or answers with an error.
pub struct CatalogService<T, S> {
    api: ApiClient<T>,
    local: ProductRepository<S>,
}

impl<T: HttpTransport, S: Storage> CatalogService<T, S> {
    pub fn new(api: ApiClient<T>, local: ProductRepository<S>) -> Self {
        Self { api, local }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn local(&self) -> &ProductRepository<S> {
        &self.local
    }

    /// All products, remote first.
    pub async fn products(&self) -> Result<Vec<Product>, CommerceError> {
        match self.api.products().list().await {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!(error = %e, "backend catalog unavailable; using local products");
                self.local.get_products()
            }
        }
    }

    /// One product, remote first. A backend 404 is a definite miss.
    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        match self.api.products().get(id).await {
            Ok(product) => Ok(Some(product)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "backend product lookup failed; using local products");
                self.local.get_product_by_id(id.as_str())
            }
        }
    }

    /// Blog posts, falling back to the bundled posts.
    pub async fn blog_posts(&self) -> Vec<BlogPost> {
        match self.api.blogs().list().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(error = %e, "backend blog unavailable; using bundled posts");
                seed_posts()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::ClientConfig;
    use std::sync::Arc;
    use tienda_store::MemoryStorage;

    fn service(mock: &MockTransport) -> CatalogService<MockTransport, Arc<MemoryStorage>> {
        let api = ApiClient::with_transport(ClientConfig::new("http://api.local"), mock.clone());
        CatalogService::new(api, ProductRepository::new(Arc::new(MemoryStorage::new())))
    }

    #[tokio::test]
    async fn test_remote_catalog_wins() {
        let mock = MockTransport::new();
        mock.push_json(200, r#"[{"id":"r1","nombre":"Remoto","precio":5}]"#);
        let products = service(&mock).products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].nombre, "Remoto");
    }

    #[tokio::test]
    async fn test_falls_back_on_network_error() {
        let mock = MockTransport::new();
        mock.push_failure("connection refused");
        let service = service(&mock);
        let products = service.products().await.unwrap();
        assert_eq!(products, service.local().get_products().unwrap());
    }

    #[tokio::test]
    async fn test_falls_back_on_server_error() {
        let mock = MockTransport::new();
        mock.push_json(503, "");
        assert!(!service(&mock).products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_product_lookup() {
        let mock = MockTransport::new();
        mock.push_json(404, "");
        mock.push_failure("timeout");
        let service = service(&mock);
        assert_eq!(service.product(&ProductId::new("p1")).await.unwrap(), None);
        let local = service.product(&ProductId::new("p1")).await.unwrap();
        assert_eq!(local.map(|p| p.id), Some(ProductId::new("p1")));
    }

    #[tokio::test]
    async fn test_blog_fallback() {
        let mock = MockTransport::new();
        mock.push_failure("offline");
        assert_eq!(service(&mock).blog_posts().await, seed_posts());
    }
}
