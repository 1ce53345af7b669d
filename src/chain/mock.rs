//! Mock chain reader for testing without an RPC node.

use super::{ChainReadError, ChainReader, ReadContract};
use crate::domain::{Address, ChainId, RawAmount};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock chain reader serving predefined contracts.
#[derive(Debug, Clone, Default)]
pub struct MockChainReader {
    contracts: HashMap<(ChainId, String), MockContract>,
    requests: Arc<Mutex<Vec<(Address, String)>>>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `contract` for `address` on `chain_id`.
    pub fn with_contract(mut self, chain_id: ChainId, address: &str, contract: MockContract) -> Self {
        self.contracts
            .insert((chain_id, address.to_lowercase()), contract);
        self
    }

    /// Every `(address, abi_json)` a handle was requested for, in order.
    pub fn requests(&self) -> Vec<(Address, String)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl ChainReader for MockChainReader {
    fn read_contract(
        &self,
        chain_id: ChainId,
        address: &Address,
        abi_json: &str,
    ) -> Option<Arc<dyn ReadContract>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((address.clone(), abi_json.to_string()));
        }
        self.contracts
            .get(&(chain_id, address.as_str().to_lowercase()))
            .map(|c| Arc::new(c.clone()) as Arc<dyn ReadContract>)
    }
}

/// Mock contract answering uint view calls.
///
/// A configured method returns zero for holders it has no amount for, as a
/// real contract's mapping would. Unknown methods revert.
#[derive(Debug, Clone, Default)]
pub struct MockContract {
    amounts: HashMap<String, HashMap<String, RawAmount>>,
    failures: HashMap<String, ChainReadError>,
    delay: Option<Duration>,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `amount` from `method(holder)`.
    pub fn with_amount(mut self, method: &str, holder: &str, amount: impl Into<RawAmount>) -> Self {
        self.amounts
            .entry(method.to_string())
            .or_default()
            .insert(holder.to_lowercase(), amount.into());
        self
    }

    /// Fail every call to `method` with `error`.
    pub fn with_failure(mut self, method: &str, error: ChainReadError) -> Self {
        self.failures.insert(method.to_string(), error);
        self
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ReadContract for MockContract {
    async fn call_amount(
        &self,
        method: &str,
        holder: &Address,
    ) -> Result<RawAmount, ChainReadError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failures.get(method) {
            return Err(err.clone());
        }
        match self.amounts.get(method) {
            Some(by_holder) => Ok(by_holder
                .get(&holder.as_str().to_lowercase())
                .cloned()
                .unwrap_or_default()),
            None => Err(ChainReadError::Reverted {
                method: method.to_string(),
                reason: "method not found".to_string(),
            }),
        }
    }
}
