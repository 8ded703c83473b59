//! Scripted transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::ClientResult;

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call to `method path`.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let key = (request.method.clone(), request.path());
        self.requests.lock().unwrap().push(request);
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        Ok(scripted.unwrap_or_else(|| {
            ApiResponse::new(
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": format!("no fake response for {} {}", key.0, key.1) }),
            )
        }))
    }
}
