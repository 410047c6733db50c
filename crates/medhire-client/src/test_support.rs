//! Scripted backend for store tests.
//!
//! Responses are replayed in the order they were queued; every call is
//! recorded so tests can assert on what was sent (or that nothing was).

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::ApiError;
use crate::request::{ApiRequest, Method};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub request: ApiRequest,
}

impl RecordedCall {
    #[must_use]
    pub const fn method(&self) -> Method {
        self.request.method
    }
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body.
    #[must_use]
    pub fn respond(self, body: Value) -> Self {
        self.push(Ok(body));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn fail(self, error: ApiError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, response: Result<Value, ApiError>) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(response);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    #[must_use]
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").last().cloned()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, endpoint: &str, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method;
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                endpoint: endpoint.to_string(),
                request,
            });

        let next = self
            .responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front();

        next.unwrap_or_else(|| {
            Err(ApiError::Transport(format!(
                "no scripted response for {} {endpoint}",
                method.as_str()
            )))
        })
    }
}
