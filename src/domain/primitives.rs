//! Domain primitives: Address, ChainId, ProtocolType.

use serde::{Deserialize, Serialize};

/// Wallet or contract address (hex string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the address is blank, i.e. never configured.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const ETHEREUM: ChainId = ChainId(1);
    pub const ARBITRUM: ChainId = ChainId(42161);
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of yield position, also used to tag a protocol summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    /// Liquidity farm: deposit plus earned reward.
    Farms,
    /// Stake with a primary reward and an optional fee reward.
    Staking,
    /// Vesting schedule split into claimable and still-vesting parts.
    Vesting,
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolType::Farms => write!(f, "farms"),
            ProtocolType::Staking => write!(f, "staking"),
            ProtocolType::Vesting => write!(f, "vesting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ProtocolType::Staking).unwrap(),
            "\"staking\""
        );
        let kind: ProtocolType = serde_json::from_str("\"vesting\"").unwrap();
        assert_eq!(kind, ProtocolType::Vesting);
        assert_eq!(ProtocolType::Farms.to_string(), "farms");
    }

    #[test]
    fn test_blank_address() {
        assert!(Address::new("  ").is_empty());
        assert!(!Address::new("0x1").is_empty());
    }

    #[test]
    fn test_chain_id_transparent_json() {
        assert_eq!(serde_json::to_string(&ChainId::ARBITRUM).unwrap(), "42161");
        assert_eq!(ChainId::ARBITRUM.to_string(), "42161");
    }
}
