//! `EthClient` — typed Ethereum reads over an [`RpcTransport`].
//!
//! Every operation is one JSON-RPC invocation: build the params, call the
//! transport, decode the raw result with `chainclient-core`. The client keeps
//! no cache; the only state is the request-id counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256};
use chainclient_core::{
    address_word, decode_hex_bytes, decode_signed, decode_unsigned, parse_big_int, parse_u64,
    selectors, split_words, to_fixed_point, CallArgs, CodecError, FixedPoint, Log, TxReceipt,
};
use num_bigint::BigInt;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::filter::{BlockTag, LogFilter};
use crate::transport::RpcTransport;

/// Ethereum JSON-RPC client.
///
/// Cheap to share behind an `Arc`; concurrent calls do not coordinate.
pub struct EthClient {
    transport: Arc<dyn RpcTransport>,
    config: ClientConfig,
    next_id: AtomicU64,
}

impl EthClient {
    /// Create a client with default configuration (reads at `latest`).
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: Arc<dyn RpcTransport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn invoke(&self, method: &'static str, params: Vec<Value>) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, url = self.transport.url(), "rpc call");
        self.transport.call(id, method, params).await.map_err(|e| {
            tracing::warn!(method, id, error = %e, "rpc call failed");
            ClientError::Invocation(e)
        })
    }

    async fn invoke_str(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<String, ClientError> {
        match self.invoke(method, params).await? {
            Value::String(s) => Ok(s),
            other => Err(ClientError::UnexpectedResult {
                method,
                reason: format!("expected a string, got {other}"),
            }),
        }
    }

    fn default_block(&self) -> Value {
        json!(self.config.default_block)
    }

    async fn call_quantity(&self, args: CallArgs) -> Result<BigInt, ClientError> {
        let raw = self
            .invoke_str("eth_call", vec![json!(args), self.default_block()])
            .await?;
        parse_big_int(&raw).map_err(ClientError::codec("eth_call"))
    }

    /// `eth_getTransactionReceipt`. A `null` result yields an unconfirmed
    /// receipt carrying `hash`.
    pub async fn get_tx_receipt(&self, hash: B256) -> Result<TxReceipt, ClientError> {
        const METHOD: &str = "eth_getTransactionReceipt";
        let result = self.invoke(METHOD, vec![json!(hash)]).await?;
        if result.is_null() {
            tracing::debug!(%hash, "receipt not available yet");
            return Ok(TxReceipt::unconfirmed(hash));
        }
        serde_json::from_value(result).map_err(|e| ClientError::UnexpectedResult {
            method: METHOD,
            reason: e.to_string(),
        })
    }

    /// `eth_getTransactionCount` at the configured block.
    pub async fn get_nonce(&self, address: Address) -> Result<u64, ClientError> {
        const METHOD: &str = "eth_getTransactionCount";
        let raw = self
            .invoke_str(METHOD, vec![json!(address), self.default_block()])
            .await?;
        parse_u64(&raw).map_err(ClientError::codec(METHOD))
    }

    /// `eth_sendRawTransaction`; returns the transaction hash reported by the node.
    pub async fn send_raw_tx(&self, signed_tx_hex: &str) -> Result<B256, ClientError> {
        const METHOD: &str = "eth_sendRawTransaction";
        let raw = self.invoke_str(METHOD, vec![json!(signed_tx_hex)]).await?;
        raw.parse::<B256>()
            .map_err(|e| ClientError::codec(METHOD)(CodecError::decode(raw.as_str(), e.to_string())))
    }

    /// `eth_getBalance`, converted from wei to ether.
    pub async fn get_eth_balance(&self, address: Address) -> Result<FixedPoint, ClientError> {
        const METHOD: &str = "eth_getBalance";
        let raw = self
            .invoke_str(METHOD, vec![json!(address), self.default_block()])
            .await?;
        let wei = parse_big_int(&raw).map_err(ClientError::codec(METHOD))?;
        Ok(to_fixed_point(&wei, self.config.ether_decimals))
    }

    /// ERC-20 `balanceOf(address)` on `token`, in the token's base units.
    pub async fn get_erc20_balance(
        &self,
        address: Address,
        token: Address,
    ) -> Result<BigInt, ClientError> {
        let args = CallArgs::new(token, selectors::ERC20_BALANCE_OF, &[address_word(address)]);
        self.call_quantity(args).await
    }

    /// Aggregator `latestAnswer()`, scaled down by `10^precision`.
    pub async fn get_aggregator_price(
        &self,
        aggregator: Address,
        precision: u32,
    ) -> Result<FixedPoint, ClientError> {
        let args = CallArgs::new(aggregator, selectors::AGGREGATOR_LATEST_ANSWER, &[]);
        let answer = self.call_quantity(args).await?;
        Ok(to_fixed_point(&answer, precision))
    }

    /// Aggregator `latestRound()`.
    pub async fn get_aggregator_round(&self, aggregator: Address) -> Result<BigInt, ClientError> {
        let args = CallArgs::new(aggregator, selectors::AGGREGATOR_LATEST_ROUND, &[]);
        self.call_quantity(args).await
    }

    /// Aggregator `latestSubmission(oracle)`: the oracle's last signed answer
    /// and the round it was submitted in.
    pub async fn get_latest_submission(
        &self,
        aggregator: Address,
        oracle: Address,
    ) -> Result<(BigInt, BigInt), ClientError> {
        let args = CallArgs::new(
            aggregator,
            selectors::AGGREGATOR_LATEST_SUBMISSION,
            &[address_word(oracle)],
        );
        let data = self.call(&args, self.config.default_block).await?;
        let words = split_words(&data).map_err(ClientError::codec("eth_call"))?;
        match words.as_slice() {
            [answer, round, ..] => Ok((decode_signed(answer), decode_unsigned(round))),
            _ => Err(ClientError::codec("eth_call")(CodecError::decode(
                format!("0x{}", hex::encode(&data)),
                format!("expected 2 words, got {}", words.len()),
            ))),
        }
    }

    /// Raw `eth_call`; returns the undecoded return data.
    pub async fn call(&self, args: &CallArgs, block: BlockTag) -> Result<Bytes, ClientError> {
        let raw = self.invoke_str("eth_call", vec![json!(args), json!(block)]).await?;
        decode_hex_bytes(&raw)
            .map(Bytes::from)
            .map_err(ClientError::codec("eth_call"))
    }

    /// `eth_chainId`.
    pub async fn get_chain_id(&self) -> Result<BigInt, ClientError> {
        let raw = self.invoke_str("eth_chainId", vec![]).await?;
        parse_big_int(&raw).map_err(ClientError::codec("eth_chainId"))
    }

    /// `eth_blockNumber`.
    pub async fn get_block_number(&self) -> Result<u64, ClientError> {
        let raw = self.invoke_str("eth_blockNumber", vec![]).await?;
        parse_u64(&raw).map_err(ClientError::codec("eth_blockNumber"))
    }

    /// `eth_getLogs` for `filter`.
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ClientError> {
        const METHOD: &str = "eth_getLogs";
        let result = self.invoke(METHOD, vec![json!(filter)]).await?;
        serde_json::from_value(result).map_err(|e| ClientError::UnexpectedResult {
            method: METHOD,
            reason: e.to_string(),
        })
    }
}
