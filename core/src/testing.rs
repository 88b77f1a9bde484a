//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{BasecampError, BasecampResult};
use crate::http::{HttpRequest, HttpResponse, Transport};

enum Scripted {
    Response(HttpResponse),
    Error(String),
}

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_raw(&self, status: u16, body: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Response(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            }));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, serde_json::to_vec(&body).unwrap());
    }

    pub fn push_status(&self, status: u16) {
        self.push_raw(status, Vec::new());
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Error(message.to_string()));
    }

    /// Queues one page holding `len` items whose ids continue from `first_id`.
    pub fn push_page(&self, first_id: u64, len: usize) {
        let items: Vec<_> = (0..len as u64)
            .map(|i| serde_json::json!({"id": first_id + i}))
            .collect();
        self.push_json(200, serde_json::Value::Array(items));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// JSON body of the last request.
    pub fn last_json(&self) -> serde_json::Value {
        let req = self.last_request();
        serde_json::from_slice(req.body.as_deref().expect("request had no body")).unwrap()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> BasecampResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Error(message)) => Err(BasecampError::Transport(message)),
            None => Err(BasecampError::Transport("no scripted response left".to_string())),
        }
    }
}
