//! Chain read abstraction for querying position contracts.

use crate::domain::{Address, ChainId, RawAmount};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub mod abi;
pub mod mock;

pub use mock::{MockChainReader, MockContract};

/// Builds read-only contract handles.
///
/// RPC connections, providers and retries belong to the implementation.
pub trait ChainReader: Send + Sync + fmt::Debug {
    /// Get a read handle for `address` on `chain_id` using `abi_json`.
    ///
    /// # Returns
    /// `None` when no handle can be built (unknown chain, unparsable ABI);
    /// the position that needed it is skipped.
    fn read_contract(
        &self,
        chain_id: ChainId,
        address: &Address,
        abi_json: &str,
    ) -> Option<Arc<dyn ReadContract>>;
}

/// A read-only contract handle.
#[async_trait]
pub trait ReadContract: Send + Sync + fmt::Debug {
    /// Call a `view` method taking one address and returning a uint.
    ///
    /// # Arguments
    /// * `method` - ABI method name (e.g. `"balanceOf"`)
    /// * `holder` - Wallet address passed as the only argument
    async fn call_amount(&self, method: &str, holder: &Address)
        -> Result<RawAmount, ChainReadError>;
}

/// Error type for chain reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainReadError {
    /// No handle could be built for the contract.
    ContractUnavailable { chain_id: ChainId, address: String },
    /// The call reverted (missing method, bad argument, paused contract)
    Reverted { method: String, reason: String },
    /// Transport failure talking to the node
    Network(String),
    /// The return data could not be decoded as a uint
    Decode(String),
}

impl fmt::Display for ChainReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainReadError::ContractUnavailable { chain_id, address } => {
                write!(f, "Contract {} unavailable on chain {}", address, chain_id)
            }
            ChainReadError::Reverted { method, reason } => {
                write!(f, "Call {} reverted: {}", method, reason)
            }
            ChainReadError::Network(msg) => write!(f, "Network error: {}", msg),
            ChainReadError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ChainReadError {}

/// Resolve a handle or fail with [`ChainReadError::ContractUnavailable`].
pub fn require_contract(
    reader: &dyn ChainReader,
    chain_id: ChainId,
    address: &Address,
    abi_json: &str,
) -> Result<Arc<dyn ReadContract>, ChainReadError> {
    reader
        .read_contract(chain_id, address, abi_json)
        .ok_or_else(|| ChainReadError::ContractUnavailable {
            chain_id,
            address: address.to_string(),
        })
}
