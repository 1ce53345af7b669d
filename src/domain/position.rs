//! Configured on-chain positions.

use crate::domain::{Address, ChainId, ProtocolType, TokenDetails};
use serde::{Deserialize, Serialize};

/// One on-chain position to evaluate for a wallet.
///
/// Kind-specific fields:
/// - `Staking`: `vault_token` is the staked token, `reward_token` the
///   primary reward, `fee_tracker`/`fee_reward_token` the optional
///   secondary reward stream.
/// - `Vesting`: `reward_token` is the vested token (the domain of the
///   contract's amounts), `vault_token` the token the still-vesting part is
///   priced as.
/// - `Farms`: `vault_token` is the deposited LP token, `reward_token` the
///   farmed reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDescriptor {
    pub name: String,
    pub protocol: String,
    pub chain_id: ChainId,
    pub address: Address,
    /// Contract ABI as JSON.
    pub abi: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: ProtocolType,
    pub vault_token: TokenDetails,
    pub reward_token: TokenDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_tracker: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_reward_token: Option<TokenDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defi_llama_id: Option<String>,
}

impl PositionDescriptor {
    pub fn abi_json(&self) -> String {
        self.abi.to_string()
    }
}
