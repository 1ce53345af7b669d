//! Price feed abstraction and the per-position quote snapshot.

use crate::domain::TokenDetails;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub mod mock;

pub use mock::MockPriceFeed;

/// Spot price feed (e.g. CoinGecko simple price).
///
/// Transport, caching and rate limiting belong to the implementation.
#[async_trait]
pub trait PriceFeed: Send + Sync + fmt::Debug {
    /// Fetch quotes for every token in one request.
    ///
    /// # Returns
    /// Quotes keyed by `TokenDetails::price_feed_key`. A key missing from the
    /// result is a valid outcome: the token is simply unpriced.
    async fn get_prices(&self, tokens: &[TokenDetails]) -> Result<PriceQuoteTable, PriceFeedError>;
}

/// Quote for one feed key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd: f64,
}

/// Read-only quote snapshot keyed by price-feed key.
///
/// Deserializes from the `{"<key>": {"usd": <price>}}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceQuoteTable(HashMap<String, PriceQuote>);

impl PriceQuoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, key: impl Into<String>, usd: f64) -> Self {
        self.0.insert(key.into(), PriceQuote { usd });
        self
    }

    pub fn get(&self, key: &str) -> Option<&PriceQuote> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the quotes whose key is in `keys`.
    pub fn restricted_to<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = PriceQuoteTable::new();
        for key in keys {
            if let Some(quote) = self.0.get(key) {
                table.0.insert(key.to_string(), *quote);
            }
        }
        table
    }
}

impl FromIterator<(String, PriceQuote)> for PriceQuoteTable {
    fn from_iter<I: IntoIterator<Item = (String, PriceQuote)>>(iter: I) -> Self {
        PriceQuoteTable(iter.into_iter().collect())
    }
}

/// Unique price-feed keys for `tokens`, first occurrence first.
pub fn feed_keys(tokens: &[TokenDetails]) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !keys.contains(&token.price_feed_key.as_str()) {
            keys.push(token.price_feed_key.as_str());
        }
    }
    keys
}

/// Error type for price feed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceFeedError {
    /// Network error (e.g., connection timeout, DNS failure)
    Network(String),
    /// Malformed response body
    Parse(String),
    /// Rate limit exceeded
    RateLimited,
}

impl fmt::Display for PriceFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFeedError::Network(msg) => write!(f, "Price feed network error: {}", msg),
            PriceFeedError::Parse(msg) => write!(f, "Price feed parse error: {}", msg),
            PriceFeedError::RateLimited => write!(f, "Price feed rate limited"),
        }
    }
}

impl std::error::Error for PriceFeedError {}
