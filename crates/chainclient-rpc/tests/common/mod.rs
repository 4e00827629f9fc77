//! In-memory transport for facade tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chainclient_rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcTransport, TransportError};
use serde_json::Value;

enum Reply {
    Result(Value),
    RpcError(JsonRpcError),
    Down(String),
}

/// Answers each method with a registered reply and records every request.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<JsonRpcRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(&self, method: &str, result: impl Into<Value>) {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::Result(result.into()));
    }

    pub fn register_rpc_error(&self, method: &str, code: i64, message: &str) {
        let err = JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        };
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::RpcError(err));
    }

    pub fn register_down(&self, method: &str, reason: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Reply::Down(reason.to_string()));
    }

    pub fn requests(&self) -> Vec<JsonRpcRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Params of the most recent call to `method`.
    pub fn last_params(&self, method: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method)
            .unwrap_or_else(|| panic!("{method} was never called"))
            .params
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        self.requests.lock().unwrap().push(req.clone());
        let replies = self.replies.lock().unwrap();
        match replies.get(&req.method) {
            Some(Reply::Result(v)) => Ok(JsonRpcResponse::success(req.id, v.clone())),
            Some(Reply::RpcError(e)) => Ok(JsonRpcResponse::failure(req.id, e.clone())),
            Some(Reply::Down(reason)) => Err(TransportError::Http(reason.clone())),
            None => Err(TransportError::Other(format!("unexpected call {}", req.method))),
        }
    }

    fn url(&self) -> &str {
        "mock://"
    }
}
