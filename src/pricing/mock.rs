//! Mock price feed for testing without network calls.

use super::{feed_keys, PriceFeed, PriceFeedError, PriceQuoteTable};
use crate::domain::TokenDetails;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock price feed answering from a fixed table.
///
/// Records the keys of every request so tests can assert batching.
#[derive(Debug, Clone, Default)]
pub struct MockPriceFeed {
    quotes: PriceQuoteTable,
    failure: Option<PriceFeedError>,
    requests: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockPriceFeed {
    pub fn new(quotes: PriceQuoteTable) -> Self {
        Self {
            quotes,
            ..Default::default()
        }
    }

    /// Fail every request with `error`.
    pub fn with_failure(mut self, error: PriceFeedError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Keys requested per call, in call order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    async fn get_prices(&self, tokens: &[TokenDetails]) -> Result<PriceQuoteTable, PriceFeedError> {
        let keys = feed_keys(tokens);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(keys.iter().map(|k| k.to_string()).collect());
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.quotes.restricted_to(keys))
    }
}
