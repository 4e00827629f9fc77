//! Block parameters and `eth_getLogs` filters.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, B256};
use chainclient_core::{parse_u64, CodecError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The block a read is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockTag {
    #[default]
    Latest,
    Pending,
    Earliest,
    Number(u64),
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Pending => write!(f, "pending"),
            Self::Earliest => write!(f, "earliest"),
            Self::Number(n) => write!(f, "{n:#x}"),
        }
    }
}

impl FromStr for BlockTag {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "pending" => Ok(Self::Pending),
            "earliest" => Ok(Self::Earliest),
            // "" and "0x" would silently mean block zero
            "" | "0x" => Err(CodecError::format(s, "empty block number")),
            other => parse_u64(other).map(Self::Number),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter object for `eth_getLogs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
    /// Positional topic match; `None` is a wildcard
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Option<B256>>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_block(mut self, block: BlockTag) -> Self {
        self.from_block = Some(block);
        self
    }

    pub fn to_block(mut self, block: BlockTag) -> Self {
        self.to_block = Some(block);
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address.push(address);
        self
    }

    /// Match logs whose `topics[0]` is `signature`.
    pub fn event(mut self, signature: B256) -> Self {
        if self.topics.is_empty() {
            self.topics.push(Some(signature));
        } else {
            self.topics[0] = Some(signature);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainclient_core::receipt::topics;

    #[test]
    fn block_tag_wire_form() {
        assert_eq!(BlockTag::Latest.to_string(), "latest");
        assert_eq!(BlockTag::Number(436).to_string(), "0x1b4");
        assert_eq!("0x1b4".parse::<BlockTag>().unwrap(), BlockTag::Number(436));
        assert_eq!("pending".parse::<BlockTag>().unwrap(), BlockTag::Pending);
        assert_eq!("12".parse::<BlockTag>().unwrap(), BlockTag::Number(12));
        assert!("0x".parse::<BlockTag>().is_err());
        assert!("newest".parse::<BlockTag>().is_err());
    }

    #[test]
    fn block_tag_serde() {
        let json = serde_json::to_value(BlockTag::Number(16)).unwrap();
        assert_eq!(json, "0x10");
        let tag: BlockTag = serde_json::from_value(serde_json::json!("earliest")).unwrap();
        assert_eq!(tag, BlockTag::Earliest);
    }

    #[test]
    fn filter_skips_unset_fields() {
        let json = serde_json::to_value(LogFilter::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let filter = LogFilter::new()
            .from_block(BlockTag::Number(1))
            .to_block(BlockTag::Latest)
            .event(topics::CHAINLINK_FULFILLED);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["fromBlock"], "0x1");
        assert_eq!(json["toBlock"], "latest");
        assert_eq!(
            json["topics"][0],
            "0x7cc135e0cebb02c3480ae5d74d377283180a2601f8f644edf7987b009316c63a"
        );
    }
}
