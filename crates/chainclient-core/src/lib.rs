//! # chainclient-core
//!
//! The pure codec half of ChainClient. Nothing in this crate performs I/O;
//! every function is a total mapping over immutable inputs.
//!
//! - [`numeric`] — hex/decimal quantity strings → [`BigInt`](num_bigint::BigInt), [`FixedPoint`]
//! - [`word`] — 32-byte two's-complement EVM words
//! - [`selector`] — function selectors, call data and [`CallArgs`]
//! - [`receipt`] — [`TxReceipt`] / [`Log`] and the run-log predicate

pub mod error;
pub mod numeric;
pub mod receipt;
pub mod selector;
pub mod word;

pub use error::CodecError;
pub use numeric::{decode_hex_bytes, parse_big_int, parse_u64, to_fixed_point, FixedPoint};
pub use receipt::{event_topic, Log, RunLogPattern, TxReceipt};
pub use selector::{build_call_data, selectors, CallArgs, FunctionSelector};
pub use word::{
    address_word, decode_signed, decode_unsigned, encode_signed, encode_unsigned, split_words,
    EvmWord,
};
