//! The `RpcTransport` trait — the only I/O boundary of the client.
//!
//! HTTP, WebSocket and IPC transports live outside this crate. Anything that
//! can turn a [`JsonRpcRequest`] into a [`JsonRpcResponse`] can back an
//! [`EthClient`](crate::EthClient); timeouts, retries and cancellation are
//! the transport's business.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// The central async trait every RPC transport must implement.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;

    /// Invoke `method` and return the raw `result` value.
    ///
    /// A JSON-RPC error object becomes [`TransportError::Rpc`].
    async fn call(
        &self,
        id: u64,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, TransportError> {
        let req = JsonRpcRequest::new(id, method, params);
        let resp = self.send(req).await?;
        resp.into_result().map_err(TransportError::Rpc)
    }
}
