//! Scripted in-memory backend for screen tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::TcpListener;

use super::{ApiError, Backend};

/// A request observed by [`ScriptedBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Post(String, Value),
}

/// Backend that replays queued responses and records every call.
/// Unscripted calls fail with status 599.
#[derive(Default)]
pub struct ScriptedBackend {
    gets: Mutex<VecDeque<Result<Value, ApiError>>>,
    posts: Mutex<VecDeque<Result<(), ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, response: Value) -> Self {
        self.gets.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn on_get_error(self, error: ApiError) -> Self {
        self.gets.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn on_post_ok(self) -> Self {
        self.posts.lock().unwrap().push_back(Ok(()));
        self
    }

    pub fn on_post_error(self, error: ApiError) -> Self {
        self.posts.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post(path, body) => Some((path, body)),
                Call::Get(_) => None,
            })
            .collect()
    }
}

/// Shorthand for a non-success HTTP status without a body
pub fn status_error(status: u16) -> ApiError {
    ApiError::Status { status, message: None }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(Call::Get(path.to_string()));
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(status_error(599)))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Post(path.to_string(), body.clone()));
        self.posts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(status_error(599)))
    }
}

/// Base URL of a local port that refuses connections
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
