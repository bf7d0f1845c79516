//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Parse the body as JSON, treating an empty body as `null`.
    pub fn json_or_null<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| FetchError::ParseError(e.to_string()))
        } else {
            self.json()
        }
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the backend's `message` (or `error`) field when
    /// the body is a JSON object, else the body text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match self.json::<serde_json::Value>() {
            Ok(body) => body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            Err(_) => self.text().unwrap_or_else(|_| "Unknown error".to_string()),
        };
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(401, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"not json");
        assert!(resp.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_empty_body_as_null() {
        let resp = make_response(204, b"");
        let value: Option<u32> = resp.json_or_null().unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let headers = HashMap::from([("Content-Type".to_string(), "text/html".to_string())]);
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status_uses_backend_message() {
        let resp = make_response(409, br#"{"message":"El correo ya existe"}"#);
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "El correo ya existe");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_plain_text() {
        let resp = make_response(500, b"Internal Server Error");
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert!(make_response(404, b"").error_for_status().unwrap_err().is_not_found());
    }
}
