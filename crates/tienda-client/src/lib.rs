//! REST client for the Tienda backend.
//!
//! [`ApiClient`] joins paths onto `base_url + api_prefix`, sends JSON and
//! attaches the session token kept in the store under `jwt_token`. The typed
//! services ([`ProductsApi`], [`OrdersApi`], [`BlogsApi`]) hang off the client,
//! and [`CatalogService`] falls back to the local catalog when the backend
//! is down.
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8080"))?
//!     .with_token_store(store.clone());
//!
//! let products = client.products().list().await?;
//! let categories = client.blogs().categories().await?;
//! ```

mod catalog;
mod client;
mod config;
mod error;
mod request;
mod response;
pub mod services;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::CatalogService;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use services::{BlogsApi, OrdersApi, ProductsApi};
pub use transport::{HttpTransport, ReqwestTransport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, CatalogService, ClientConfig, FetchError, HttpTransport};
}
