//! In-process transport double for service and cursor tests.

use crate::transport::{ApiRequest, SharedTransport, Transport};
use async_trait::async_trait;
use paygate_core::{GatewayError, GatewayResult};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::sync::{Arc, Mutex};

/// Replays queued JSON responses and records every request it receives
pub struct MockTransport {
    responses: Mutex<Vec<JsonValue>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Responses are served in the given order
    pub fn new(responses: Vec<JsonValue>) -> Self {
        let mut queue = responses;
        queue.reverse();
        Self {
            responses: Mutex::new(queue),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(responses: Vec<JsonValue>) -> Arc<Self> {
        Arc::new(Self::new(responses))
    }

    /// Every request executed so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> GatewayResult<JsonMap<String, JsonValue>> {
        self.requests.lock().unwrap().push(request.clone());

        let Some(response) = self.responses.lock().unwrap().pop() else {
            return Err(GatewayError::State(format!(
                "no queued response for {:?} {}",
                request.method, request.path
            )));
        };
        match response {
            JsonValue::Object(map) => Ok(map),
            other => Err(GatewayError::Format(format!(
                "queued response is not an object: {other}"
            ))),
        }
    }
}

/// Convenience cast so tests can keep a concrete handle for assertions
pub fn as_transport(mock: &Arc<MockTransport>) -> SharedTransport {
    Arc::clone(mock) as SharedTransport
}
