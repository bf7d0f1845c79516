//! In-memory transport for tests.

use crate::{FetchError, HttpTransport, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Replays queued responses and records every request it receives.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<Response, String>>>>,
    requests: Arc<Mutex<Vec<RequestBuilder>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, body: &str) {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Response::new(status, headers, body.as_bytes().to_vec())));
    }

    /// Queue a connection failure.
    pub(crate) fn push_failure(&self, reason: &str) {
        self.responses.lock().unwrap().push_back(Err(reason.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(FetchError::RequestError(reason)),
            None => Err(FetchError::RequestError("no response queued".into())),
        }
    }
}
