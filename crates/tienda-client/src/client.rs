//! The backend client.

use crate::services::{BlogsApi, OrdersApi, ProductsApi};
use crate::{ClientConfig, FetchError, HttpTransport, Method, ReqwestTransport, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tienda_store::{keys, Storage};

/// Client for the storefront REST backend.
///
/// Every request carries `Content-Type: application/json`. When a token
/// store is attached, the session token under `jwt_token` is read fresh for
/// each request and sent as a bearer token; otherwise the configured basic
/// auth credentials, if any, are used.
pub struct ApiClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: Arc<T>,
    tokens: Option<Arc<dyn Storage>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            tokens: self.tokens.clone(),
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            tokens: None,
        }
    }

    /// Read the session token from `store` on every request.
    pub fn with_token_store(mut self, store: Arc<dyn Storage>) -> Self {
        self.tokens = Some(store);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The token store, if one is attached.
    pub fn token_store(&self) -> Option<&Arc<dyn Storage>> {
        self.tokens.as_ref()
    }

    /// The current session token, if any.
    pub fn token(&self) -> Result<Option<String>, FetchError> {
        let Some(store) = &self.tokens else {
            return Ok(None);
        };
        let token = store
            .get_item(keys::JWT_TOKEN)?
            .map(|raw| raw.trim().trim_matches('"').to_string())
            .filter(|t| !t.is_empty());
        Ok(token)
    }

    /// Start a request to an API path with the auth headers applied.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, FetchError> {
        let request = RequestBuilder::new(method, self.config.url(path))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(token) = self.token()? {
            return Ok(request.bearer_auth(token));
        }
        Ok(match &self.config.basic_auth_user {
            Some(user) => request.basic_auth(user, self.config.basic_auth_password.as_deref()),
            None => request,
        })
    }

    /// Send a request, turning non-2xx answers into errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.transport.send(request).await?.error_for_status()
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, FetchError> {
        self.get_json_with(path, &[]).await
    }

    /// GET with query parameters.
    pub async fn get_json_with<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<R, FetchError> {
        let request = self.request(Method::Get, path)?.query(params.iter().copied());
        self.send(request).await?.json_or_null()
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(Method::Post, path, body).await
    }

    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(Method::Put, path, body).await
    }

    pub async fn patch_json<B, R>(&self, path: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(Method::Patch, path, body).await
    }

    /// DELETE, ignoring whatever body comes back.
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        let request = self.request(Method::Delete, path)?;
        self.send(request).await?;
        Ok(())
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body)?;
        self.send(request).await?.json_or_null()
    }

    pub fn products(&self) -> ProductsApi<'_, T> {
        ProductsApi::new(self)
    }

    pub fn orders(&self) -> OrdersApi<'_, T> {
        OrdersApi::new(self)
    }

    pub fn blogs(&self) -> BlogsApi<'_, T> {
        BlogsApi::new(self)
    }
}
