//! HTTP request builder.

use crate::FetchError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header, replacing any previous value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append query parameters.
    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Add a basic authorization header.
    pub fn basic_auth(self, username: impl AsRef<str>, password: Option<&str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.unwrap_or(""));
        let encoded = STANDARD.encode(credentials.as_bytes());
        self.header("Authorization", format!("Basic {}", encoded))
    }

    /// Look up a header case-insensitively.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        let req = RequestBuilder::new(Method::Get, "/x").basic_auth("user", Some("1234"));
        assert_eq!(req.header_value("authorization"), Some("Basic dXNlcjoxMjM0"));
    }

    #[test]
    fn test_bearer_replaces_basic() {
        let req = RequestBuilder::new(Method::Get, "/x")
            .basic_auth("user", Some("1234"))
            .bearer_auth("abc");
        assert_eq!(req.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_json_body() {
        let req = RequestBuilder::new(Method::Patch, "/orders/1")
            .json(&serde_json::json!({"status": "success"}))
            .unwrap();
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(br#"{"status":"success"}"#.as_slice()));
    }

    #[test]
    fn test_query_params() {
        let req = RequestBuilder::new(Method::Get, "/blogs").query([("category", "Guías")]);
        assert_eq!(req.query, vec![("category".to_string(), "Guías".to_string())]);
    }
}
