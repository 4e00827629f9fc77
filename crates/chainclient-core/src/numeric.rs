//! Numeric decoding of JSON-RPC results.
//!
//! Nodes return quantities either as `0x`-prefixed hex (`eth_getBalance`,
//! `eth_call`) or as plain decimal text (some aggregator proxies). Both
//! decode into an exact [`BigInt`]; nothing here goes through `u64` or `f64`.
//!
//! `""` and `"0x"` are the only inputs that decode to zero without digits:
//! nodes return `"0x"` for empty return data.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// Decode a hex (`0x…`) or decimal numeric string into an exact integer.
pub fn parse_big_int(s: &str) -> Result<BigInt, CodecError> {
    if s.is_empty() {
        return Ok(BigInt::zero());
    }

    if let Some(hex) = s.strip_prefix("0x") {
        if hex.is_empty() {
            return Ok(BigInt::zero());
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::decode(s, "non-hex digit after 0x"));
        }
        return BigUint::parse_bytes(hex.as_bytes(), 16)
            .map(BigInt::from)
            .ok_or_else(|| CodecError::decode(s, "invalid hex quantity"));
    }

    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::decode(s, "not a decimal integer"));
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| CodecError::decode(s, "invalid decimal quantity"))
}

/// Decode a numeric string and narrow it to `u64`.
pub fn parse_u64(s: &str) -> Result<u64, CodecError> {
    let n = parse_big_int(s)?;
    u64::try_from(&n).map_err(|_| CodecError::range(&n, "exceeds u64"))
}

/// Decode `0x`-prefixed hex data into raw bytes.
///
/// `""` and `"0x"` decode to an empty vector.
pub fn decode_hex_bytes(s: &str) -> Result<Vec<u8>, CodecError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let hex = s
        .strip_prefix("0x")
        .ok_or_else(|| CodecError::decode(s, "missing 0x prefix"))?;
    hex::decode(hex).map_err(|e| CodecError::decode(s, e.to_string()))
}

/// Scale an integer down by `10^precision`, keeping every digit.
pub fn to_fixed_point(n: &BigInt, precision: u32) -> FixedPoint {
    FixedPoint::new(n.clone(), precision)
}

fn ten_pow(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// An exact decimal: `mantissa / 10^scale`.
///
/// Equality and ordering compare values, so `2.56` (scale 2) equals
/// `2.5600` (scale 4). `Display` always prints exactly `scale` fractional
/// digits: `256` at scale 18 renders `0.000000000000000256`.
#[derive(Debug, Clone)]
pub struct FixedPoint {
    mantissa: BigInt,
    scale: u32,
}

impl FixedPoint {
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self::new(n.into(), 0)
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(&self) -> BigInt {
        &self.mantissa / ten_pow(self.scale)
    }

    /// Re-express at a larger scale. Returns `None` when `scale` would
    /// drop digits.
    pub fn with_scale(&self, scale: u32) -> Option<Self> {
        if scale < self.scale {
            let divisor = ten_pow(self.scale - scale);
            if !(&self.mantissa % &divisor).is_zero() {
                return None;
            }
            return Some(Self::new(&self.mantissa / divisor, scale));
        }
        Some(Self::new(
            &self.mantissa * ten_pow(scale - self.scale),
            scale,
        ))
    }

    fn aligned(&self, other: &Self) -> (BigInt, BigInt) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.mantissa.clone(), other.mantissa.clone()),
            Ordering::Less => (
                &self.mantissa * ten_pow(other.scale - self.scale),
                other.mantissa.clone(),
            ),
            Ordering::Greater => (
                self.mantissa.clone(),
                &other.mantissa * ten_pow(self.scale - other.scale),
            ),
        }
    }
}

impl PartialEq for FixedPoint {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.aligned(other);
        a == b
    }
}

impl Eq for FixedPoint {}

impl PartialOrd for FixedPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.aligned(other);
        a.cmp(&b)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.sign() == Sign::Minus { "-" } else { "" };
        let digits = self.mantissa.abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl FromStr for FixedPoint {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((_, "")) => return Err(CodecError::decode(s, "missing fractional digits")),
            Some(parts) => parts,
            None => (body, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CodecError::decode(s, "not a decimal number"));
        }
        let scale = u32::try_from(frac_part.len())
            .map_err(|_| CodecError::decode(s, "too many fractional digits"))?;
        let digits = format!("{int_part}{frac_part}");
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| CodecError::decode(s, "not a decimal number"))?;
        if negative {
            mantissa = -mantissa;
        }
        Ok(Self::new(mantissa, scale))
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapters for optional JSON-RPC quantities (`"0x1b"` or `null`).
pub mod quantity {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&format!("{n:#x}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BigInt>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_big_int(&s))
            .transpose()
            .map_err(serde::de::Error::custom)
    }

    /// Same wire shape, narrowed to `u64`.
    pub mod u64_opt {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(n) => serializer.serialize_str(&format!("{n:#x}")),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::super::parse_u64(&s))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_bare_prefix_are_zero() {
        assert_eq!(parse_big_int("").unwrap(), BigInt::zero());
        assert_eq!(parse_big_int("0x").unwrap(), BigInt::zero());
        assert_eq!(parse_big_int("0x0").unwrap(), BigInt::zero());
        assert_eq!(parse_big_int("0").unwrap(), BigInt::zero());
    }

    #[test]
    fn hex_and_decimal() {
        assert_eq!(parse_big_int("0x0100").unwrap(), BigInt::from(256));
        assert_eq!(parse_big_int("12").unwrap(), BigInt::from(12));
        assert_eq!(parse_big_int("0xFF").unwrap(), BigInt::from(255));
    }

    #[test]
    fn wider_than_u128_is_exact() {
        let n = parse_big_int("0x4b3b4ca85a86c47a098a224000000000").unwrap();
        assert_eq!(n.to_string(), "100000000000000000000000000000000000000");

        let big = "52050000000000000000000000000000000000000000000000";
        assert_eq!(parse_big_int(big).unwrap().to_string(), big);
    }

    #[test]
    fn malformed_input_fails_closed() {
        for bad in ["0xzz", "12a", "-5", " 1", "0x 1", "1_000", "0X10"] {
            let err = parse_big_int(bad).unwrap_err();
            assert!(
                matches!(&err, CodecError::Decode { input, .. } if input == bad),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn parse_u64_rejects_overflow() {
        assert_eq!(parse_u64("0x0100").unwrap(), 256);
        assert!(matches!(
            parse_u64("0x10000000000000000"),
            Err(CodecError::Range { .. })
        ));
    }

    #[test]
    fn hex_bytes() {
        assert!(decode_hex_bytes("0x").unwrap().is_empty());
        assert_eq!(decode_hex_bytes("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode_hex_bytes("0x0").is_err());
        assert!(decode_hex_bytes("0a0b").is_err());
    }

    #[test]
    fn fixed_point_scaling() {
        assert_eq!(
            to_fixed_point(&BigInt::from(256), 2),
            "2.56".parse::<FixedPoint>().unwrap()
        );
        assert_eq!(
            to_fixed_point(&BigInt::from(10_000_000_000_000u64), 11),
            FixedPoint::from_integer(100)
        );
        let large = parse_big_int("52050000000000000000").unwrap();
        assert_eq!(
            to_fixed_point(&large, 11),
            FixedPoint::from_integer(520_500_000)
        );
    }

    #[test]
    fn fixed_point_display_keeps_scale() {
        assert_eq!(
            to_fixed_point(&BigInt::from(256), 18).to_string(),
            "0.000000000000000256"
        );
        let wei = parse_big_int("0x4b3b4ca85a86c47a098a224000000000").unwrap();
        assert_eq!(
            to_fixed_point(&wei, 18).to_string(),
            "100000000000000000000.000000000000000000"
        );
        assert_eq!(FixedPoint::new(BigInt::from(-5), 2).to_string(), "-0.05");
        assert_eq!(FixedPoint::from_integer(7).to_string(), "7");
    }

    #[test]
    fn fixed_point_rescale_and_trunc() {
        let v = FixedPoint::new(BigInt::from(25_600), 4);
        assert_eq!(v.with_scale(2).unwrap().mantissa(), &BigInt::from(256));
        assert!(FixedPoint::new(BigInt::from(25_601), 4).with_scale(2).is_none());
        assert_eq!(v.trunc(), BigInt::from(2));
        assert!(v > FixedPoint::from_integer(2));
    }

    #[test]
    fn fixed_point_parse_rejects_incomplete_decimals() {
        assert_eq!(
            "-0.05".parse::<FixedPoint>().unwrap(),
            FixedPoint::new(BigInt::from(-5), 2)
        );
        for bad in ["2.", "-2.", ".5", ".", "", "-", "1.2.3", "1,5", "+1"] {
            let err = bad.parse::<FixedPoint>().unwrap_err();
            assert!(
                matches!(&err, CodecError::Decode { input, .. } if input == bad),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn fixed_point_serde_as_string() {
        let v = FixedPoint::new(BigInt::from(256), 2);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"2.56\"");
        let back: FixedPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
