//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::filter::BlockTag;

/// Configuration for [`EthClient`](crate::EthClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Block tag for `eth_call`, `eth_getBalance` and `eth_getTransactionCount`
    #[serde(default)]
    pub default_block: BlockTag,
    /// Decimal places of the native currency (wei → ether)
    #[serde(default = "default_ether_decimals")]
    pub ether_decimals: u32,
}

fn default_ether_decimals() -> u32 { 18 }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_block: BlockTag::Latest,
            ether_decimals: default_ether_decimals(),
        }
    }
}
