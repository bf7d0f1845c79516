//! Sending requests over the wire.

use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Something that can execute a request.
///
/// [`ReqwestTransport`] is the real implementation; tests plug in their own.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "response");
        Ok(Response::new(status, headers, body))
    }
}
