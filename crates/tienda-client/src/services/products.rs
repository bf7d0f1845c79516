//! `/products` and `/admin/products`.

use crate::{ApiClient, FetchError, HttpTransport};
use serde_json::Value;
use tienda_commerce::catalog::{normalize_fields, Product};
use tienda_commerce::ProductId;

/// Product endpoints. Reads are public; writes go through `/admin`.
pub struct ProductsApi<'a, T> {
    client: &'a ApiClient<T>,
}

/// Decode a backend product, folding legacy field names first.
fn decode(mut value: Value) -> Result<Product, FetchError> {
    if let Value::Object(object) = &mut value {
        normalize_fields(object);
    }
    Ok(serde_json::from_value(value)?)
}

impl<'a, T: HttpTransport> ProductsApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>, FetchError> {
        self.list_with(&[]).await
    }

    /// List products with backend filters such as `categoria`.
    pub async fn list_with(&self, params: &[(&str, &str)]) -> Result<Vec<Product>, FetchError> {
        let raw: Option<Vec<Value>> = self.client.get_json_with("/products", params).await?;
        let products = raw
            .unwrap_or_default()
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    pub async fn get(&self, id: &ProductId) -> Result<Product, FetchError> {
        let raw: Value = self.client.get_json(&format!("/products/{id}")).await?;
        decode(raw)
    }

    pub async fn create(&self, product: &Product) -> Result<Product, FetchError> {
        let raw: Value = self.client.post_json("/admin/products", product).await?;
        decode(raw)
    }

    pub async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, FetchError> {
        let raw: Value = self
            .client
            .put_json(&format!("/admin/products/{id}"), product)
            .await?;
        decode(raw)
    }

    pub async fn delete(&self, id: &ProductId) -> Result<(), FetchError> {
        self.client.delete(&format!("/admin/products/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::MockTransport;
    use crate::{ApiClient, ClientConfig, Method};
    use tienda_commerce::catalog::Product;
    use tienda_commerce::ProductId;

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::with_transport(ClientConfig::new("http://api.local"), mock.clone())
    }

    #[tokio::test]
    async fn test_list_accepts_backend_field_names() {
        let mock = MockTransport::new();
        mock.push_json(
            200,
            r#"[{"id": 7, "name": "Monitor", "price": "199.9", "stock": 3},
                {"id": "p1", "nombre": "Mouse", "precio": 10}]"#,
        );
        let products = client(&mock).products().list().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new("7"));
        assert_eq!(products[0].nombre, "Monitor");
        assert_eq!(products[0].precio, 199.9);
        assert_eq!(products[1].nombre, "Mouse");
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let mock = MockTransport::new();
        mock.push_json(200, "[]");
        client(&mock)
            .products()
            .list_with(&[("categoria", "Periféricos")])
            .await
            .unwrap();
        let seen = mock.requests();
        assert_eq!(seen[0].query, vec![("categoria".to_string(), "Periféricos".to_string())]);
    }

    #[tokio::test]
    async fn test_admin_writes_hit_admin_paths() {
        let mock = MockTransport::new();
        let product = Product::new("p9", "Webcam", 45.0);
        mock.push_json(201, r#"{"id":"p9","nombre":"Webcam","precio":45}"#);
        mock.push_json(200, r#"{"id":"p9","nombre":"Webcam HD","precio":45}"#);
        mock.push_json(204, "");

        let client = client(&mock);
        let api = client.products();
        assert_eq!(api.create(&product).await.unwrap().nombre, "Webcam");
        let updated = api.update(&product.id, &product).await.unwrap();
        assert_eq!(updated.nombre, "Webcam HD");
        api.delete(&product.id).await.unwrap();

        let seen = mock.requests();
        assert_eq!(seen[0].method, Method::Post);
        assert_eq!(seen[0].url, "http://api.local/api/v1/admin/products");
        assert_eq!(seen[1].method, Method::Put);
        assert_eq!(seen[1].url, "http://api.local/api/v1/admin/products/p9");
        assert_eq!(seen[2].method, Method::Delete);
    }
}
