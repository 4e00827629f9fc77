//! chainclient-rpc — typed Ethereum reads over an abstract JSON-RPC transport.
//!
//! # Overview
//!
//! - [`RpcTransport`] — the single capability the client consumes
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`EthClient`] — nonce, balances, receipts, raw sends and aggregator reads
//! - [`ClientError`] — transport failures passed through, plus decode failures
//! - [`tracing_setup`] — subscriber initialisation from a [`LogConfig`]

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod request;
pub mod tracing_setup;
pub mod transport;

pub use client::EthClient;
pub use config::ClientConfig;
pub use error::{ClientError, TransportError};
pub use filter::{BlockTag, LogFilter};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use tracing_setup::{init_tracing, LogConfig};
pub use transport::RpcTransport;
