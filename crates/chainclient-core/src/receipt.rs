//! Transaction receipts, event logs and run-log classification.
//!
//! Receipts are deserialized straight from the `eth_getTransactionReceipt`
//! result object. A pending transaction has a `null` block number; the
//! `logs` array may be empty, `null` or absent.

use alloy_primitives::{b256, Address, Bytes, B256};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::numeric::quantity;

/// Event signature topics recognised by [`TxReceipt::run_log_pattern`].
pub mod topics {
    use super::{b256, B256};

    /// `ChainlinkFulfilled(bytes32)`, emitted by a consumer when an oracle answers.
    pub const CHAINLINK_FULFILLED: B256 =
        b256!("7cc135e0cebb02c3480ae5d74d377283180a2601f8f644edf7987b009316c63a");

    /// `ChainlinkRequested(bytes32)`, emitted by a consumer when it opens a request.
    pub const CHAINLINK_REQUESTED: B256 =
        b256!("b5e6e01e79f91267dc17b4e6314d5d4d03593d2ceee0fbb452b750bd70ea5af9");

    /// `OracleRequest(bytes32,address,bytes32,uint256,address,bytes4,uint256,uint256,bytes)`.
    pub const ORACLE_REQUEST: B256 =
        b256!("d8d7ecc4800d25fa53ce0372f13a416d98907a7ef3d8d3bdd79cf4fe75529c65");

    /// `RunRequest(bytes32,address,uint256,uint256,uint256,bytes)`, the legacy oracle request.
    pub const RUN_REQUEST: B256 =
        b256!("6d6db1f8fe19d95b1d0fa6a4bce7bb24fbf84597b35a33ff95521fac453c1529");

    pub(crate) const REQUEST_TOPICS: [B256; 3] = [CHAINLINK_REQUESTED, ORACLE_REQUEST, RUN_REQUEST];
}

/// keccak256 of an event signature, i.e. the value of `topics[0]`.
pub fn event_topic(signature: &str) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    B256::from(output)
}

/// One EVM event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Contract that emitted the event
    pub address: Address,
    /// topics[0] is the event signature; the rest are indexed params
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default, with = "quantity")]
    pub block_number: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    #[serde(default, with = "quantity::u64_opt")]
    pub transaction_index: Option<u64>,
    #[serde(default, with = "quantity::u64_opt")]
    pub log_index: Option<u64>,
    /// Set when a reorg dropped the log
    #[serde(default)]
    pub removed: bool,
}

impl Log {
    pub fn event_signature(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// What kind of oracle run-log traffic a receipt carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLogPattern {
    /// No oracle request or fulfillment event.
    NoRunLog,
    /// A job was requested but not answered in this transaction.
    Requested,
    /// An oracle answered a request.
    Fulfilled,
}

/// A mined (or pending) transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    #[serde(rename = "transactionHash")]
    pub hash: B256,
    /// `None` while the transaction is pending
    #[serde(default, with = "quantity")]
    pub block_number: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, with = "quantity::u64_opt")]
    pub transaction_index: Option<u64>,
    /// `0x1` success, `0x0` revert (post-Byzantium)
    #[serde(default, with = "quantity::u64_opt")]
    pub status: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<Log>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Log>, D::Error> {
    Ok(Option::<Vec<Log>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TxReceipt {
    /// Receipt for a transaction the node has not mined yet.
    pub fn unconfirmed(hash: B256) -> Self {
        Self {
            hash,
            block_number: None,
            block_hash: None,
            transaction_index: None,
            status: None,
            logs: Vec::new(),
        }
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.block_number.is_none()
    }

    /// Classify the receipt by the event signatures of its logs.
    ///
    /// A fulfillment wins over a request when both appear, since a
    /// fulfilling transaction may itself open a follow-up request.
    pub fn run_log_pattern(&self) -> RunLogPattern {
        let mut requested = false;
        for sig in self.logs.iter().filter_map(Log::event_signature) {
            if *sig == topics::CHAINLINK_FULFILLED {
                return RunLogPattern::Fulfilled;
            }
            if topics::REQUEST_TOPICS.contains(sig) {
                requested = true;
            }
        }
        if requested {
            RunLogPattern::Requested
        } else {
            RunLogPattern::NoRunLog
        }
    }

    /// `true` when this receipt carries an oracle fulfillment.
    pub fn fulfilled_run_log(&self) -> bool {
        self.run_log_pattern() == RunLogPattern::Fulfilled
    }
}
