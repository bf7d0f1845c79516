//! Scripted transport for backend tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tienda_client::{FetchError, HttpTransport, RequestBuilder, Response};

#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<(u16, String)>>>,
    requests: Arc<Mutex<Vec<RequestBuilder>>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn body_json(&self, index: usize) -> serde_json::Value {
        let body = self.requests()[index].body.clone().unwrap_or_default();
        serde_json::from_slice(&body).unwrap()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(request);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| FetchError::RequestError("no reply scripted".into()))?;
        Ok(Response::new(status, HashMap::new(), body.into_bytes()))
    }
}
