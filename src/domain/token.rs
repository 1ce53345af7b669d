//! Token metadata as supplied by the token registry.

use crate::domain::{Address, ChainId};
use serde::{Deserialize, Serialize};

/// Identifies a token and how to price it.
///
/// `decimals` is the only exponent ever used to interpret raw amounts of
/// this token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    pub chain_id: ChainId,
    pub address: Address,
    pub symbol: String,
    pub decimals: u32,
    /// Lookup key in the external price feed (e.g. a CoinGecko id).
    pub price_feed_key: String,
}

impl TokenDetails {
    pub fn new(
        chain_id: ChainId,
        address: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u32,
        price_feed_key: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address: Address::new(address),
            symbol: symbol.into(),
            decimals,
            price_feed_key: price_feed_key.into(),
        }
    }
}
