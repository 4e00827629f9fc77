//! 32-byte EVM word codec.
//!
//! ABI arguments and return values are laid out as big-endian 32-byte words.
//! Unsigned values are left-padded with zeros; signed values use 256-bit
//! two's complement, so negatives are left-padded with `0xff`.

use alloy_primitives::{Address, B256};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

use crate::error::CodecError;

/// Width of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// A single ABI word.
pub type EvmWord = B256;

fn two_pow(bits: usize) -> BigInt {
    BigInt::one() << bits
}

/// Encode a non-negative integer below `2^256`.
pub fn encode_unsigned(n: &BigInt) -> Result<EvmWord, CodecError> {
    if n.sign() == Sign::Minus {
        return Err(CodecError::range(n, "negative value in unsigned word"));
    }
    if n.bits() > 256 {
        return Err(CodecError::range(n, "exceeds 2^256 - 1"));
    }
    let (_, bytes) = n.to_bytes_be();
    Ok(left_pad(&bytes, 0x00))
}

/// Encode an integer in `[-2^255, 2^255 - 1]` as two's complement.
pub fn encode_signed(n: &BigInt) -> Result<EvmWord, CodecError> {
    let limit = two_pow(255);
    if n >= &limit || n < &-limit {
        return Err(CodecError::range(n, "outside int256 range"));
    }
    if n.sign() != Sign::Minus {
        let (_, bytes) = n.to_bytes_be();
        return Ok(left_pad(&bytes, 0x00));
    }
    let complement = two_pow(256) + n;
    let (_, bytes) = complement.to_bytes_be();
    Ok(left_pad(&bytes, 0xff))
}

/// Decode a word as an unsigned integer.
pub fn decode_unsigned(word: &EvmWord) -> BigInt {
    BigInt::from(BigUint::from_bytes_be(word.as_slice()))
}

/// Decode a word as a two's-complement signed integer.
pub fn decode_signed(word: &EvmWord) -> BigInt {
    let unsigned = decode_unsigned(word);
    if word[0] & 0x80 == 0 {
        unsigned
    } else {
        unsigned - two_pow(256)
    }
}

/// The ABI word of an `address` argument: 12 zero bytes, then the address.
pub fn address_word(address: Address) -> EvmWord {
    address.into_word()
}

/// Slice a return payload into consecutive words.
pub fn split_words(data: &[u8]) -> Result<Vec<EvmWord>, CodecError> {
    if data.len() % WORD_SIZE != 0 {
        return Err(CodecError::decode(
            format!("0x{}", hex::encode(data)),
            format!("{} bytes is not a whole number of words", data.len()),
        ));
    }
    Ok(data.chunks_exact(WORD_SIZE).map(B256::from_slice).collect())
}

fn left_pad(bytes: &[u8], fill: u8) -> EvmWord {
    let mut word = [fill; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
    B256::from(word)
}
