//! In-memory REST double for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{HttpMethod, RestError};
use crate::ports::RestClient;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl std::fmt::Display for RecordedCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Records every request and replays queued responses (`Null` once the queue is empty)
#[derive(Default)]
pub(crate) struct RecordingRest {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<serde_json::Value, RestError>>>,
}

impl RecordingRest {
    pub fn respond(&self, value: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn fail(&self, error: RestError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RestError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}
