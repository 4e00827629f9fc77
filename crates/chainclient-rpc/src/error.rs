//! Transport and client error types.

use chainclient_core::CodecError;
use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors reported by an [`RpcTransport`](crate::RpcTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// WebSocket connection/send/receive error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this error is transient and the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::WebSocket(_) | Self::Timeout { .. })
    }
}

/// Errors returned by [`EthClient`](crate::EthClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed; passed through untouched.
    #[error(transparent)]
    Invocation(#[from] TransportError),

    /// The node answered, but the value could not be decoded.
    #[error("{method}: {source}")]
    Codec {
        method: &'static str,
        #[source]
        source: CodecError,
    },

    /// The result had the wrong JSON shape for the method.
    #[error("{method}: unexpected result: {reason}")]
    UnexpectedResult { method: &'static str, reason: String },
}

impl ClientError {
    pub(crate) fn codec(method: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| Self::Codec { method, source }
    }

    /// The underlying transport error, if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Invocation(e) => Some(e),
            _ => None,
        }
    }

    /// The underlying codec error, if this is one.
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec { source, .. } => Some(source),
            _ => None,
        }
    }
}
