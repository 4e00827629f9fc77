//! Error types for the codec layer.

use thiserror::Error;

/// Errors raised while decoding RPC values or encoding call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A numeric or hex string returned by a node could not be parsed.
    #[error("cannot decode {input:?}: {reason}")]
    Decode { input: String, reason: String },

    /// A selector or address literal supplied by the caller is malformed.
    #[error("malformed literal {input:?}: {reason}")]
    Format { input: String, reason: String },

    /// An integer does not fit the target representation.
    #[error("value {value} out of range: {reason}")]
    Range { value: String, reason: String },
}

impl CodecError {
    /// A [`CodecError::Decode`] for `input` that failed to parse.
    pub fn decode(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// A [`CodecError::Format`] for a malformed caller-supplied literal.
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// A [`CodecError::Range`] for `value` that does not fit its target type.
    pub fn range(value: impl ToString, reason: impl Into<String>) -> Self {
        Self::Range {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_offending_input() {
        assert_eq!(
            CodecError::decode("0xzz", "invalid hex").to_string(),
            "cannot decode \"0xzz\": invalid hex"
        );
        assert!(matches!(
            CodecError::format("0x1234", "expected 4 bytes"),
            CodecError::Format { input, .. } if input == "0x1234"
        ));
        assert_eq!(
            CodecError::range(u128::MAX, "exceeds u64").to_string(),
            format!("value {} out of range: exceeds u64", u128::MAX)
        );
    }
}
