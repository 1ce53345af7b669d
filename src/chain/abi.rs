//! Contract method names and the fixed fee-tracker ABI.

/// Staked amount of a holder on a staking contract.
pub const STAKED_AMOUNTS: &str = "stakedAmounts";
/// Claimable reward on staking, vesting and fee-tracker contracts.
pub const CLAIMABLE: &str = "claimable";
/// Total balance (deposit on a farm, allocation on a vester).
pub const BALANCE_OF: &str = "balanceOf";
/// Earned farm reward.
pub const EARNED: &str = "earned";

/// Minimal reward-tracker ABI used for fee-reward trackers, independent of
/// the ABI configured on the staking position itself.
pub const REWARD_TRACKER_ABI: &str = r#"[
  {
    "inputs": [{ "internalType": "address", "name": "_account", "type": "address" }],
    "name": "claimable",
    "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [{ "internalType": "address", "name": "_account", "type": "address" }],
    "name": "stakedAmounts",
    "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
    "stateMutability": "view",
    "type": "function"
  }
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_tracker_abi_is_valid_json() {
        let abi: serde_json::Value = serde_json::from_str(REWARD_TRACKER_ABI).unwrap();
        let names: Vec<&str> = abi
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["name"].as_str())
            .collect();
        assert!(names.contains(&CLAIMABLE));
    }
}
