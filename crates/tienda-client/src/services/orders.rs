//! `/orders`.

use crate::{ApiClient, FetchError, HttpTransport};
use serde::Deserialize;
use serde_json::json;
use tienda_commerce::checkout::{Order, OrderStatus};
use tienda_commerce::OrderId;

/// Order endpoints.
pub struct OrdersApi<'a, T> {
    client: &'a ApiClient<T>,
}

#[derive(Deserialize)]
struct CountBody {
    #[serde(default)]
    count: u64,
}

impl<'a, T: HttpTransport> OrdersApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Order>, FetchError> {
        let orders: Option<Vec<Order>> = self.client.get_json("/orders").await?;
        Ok(orders.unwrap_or_default())
    }

    pub async fn get(&self, id: &OrderId) -> Result<Order, FetchError> {
        self.client.get_json(&format!("/orders/{id}")).await
    }

    /// Number of orders the backend holds.
    pub async fn count(&self) -> Result<u64, FetchError> {
        let body: Option<CountBody> = self.client.get_json("/orders/count").await?;
        Ok(body.map(|b| b.count).unwrap_or(0))
    }

    pub async fn create(&self, order: &Order) -> Result<Order, FetchError> {
        self.client.post_json("/orders", order).await
    }

    pub async fn update(&self, id: &OrderId, order: &Order) -> Result<Order, FetchError> {
        self.client.put_json(&format!("/orders/{id}"), order).await
    }

    /// Change only the status of an order.
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, FetchError> {
        self.client
            .patch_json(&format!("/orders/{id}"), &json!({ "status": status }))
            .await
    }

    pub async fn delete(&self, id: &OrderId) -> Result<(), FetchError> {
        self.client.delete(&format!("/orders/{id}")).await
    }
}
