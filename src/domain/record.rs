//! Normalized valuation output.

use crate::domain::{Decimal, ProtocolType, TokenDetails};
use serde::{Deserialize, Serialize};

/// One priced balance or reward line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    /// Human-readable amount, exact in the token's decimals.
    pub amount: String,
    pub token: TokenDetails,
    /// Unit price used, `0` when the feed had no quote.
    pub unit_price: f64,
    pub usd_value: Decimal,
}

/// One evaluated position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub balances: Vec<ValueEntry>,
    pub pool: Vec<TokenDetails>,
    pub rewards: Vec<ValueEntry>,
    /// Sum of every balance and reward USD value.
    pub usd_value: Decimal,
    /// Contract address of the position.
    pub address: String,
}

impl PositionRecord {
    pub fn new(
        address: String,
        balances: Vec<ValueEntry>,
        pool: Vec<TokenDetails>,
        rewards: Vec<ValueEntry>,
    ) -> Self {
        let usd_value = balances
            .iter()
            .chain(rewards.iter())
            .map(|entry| entry.usd_value)
            .sum();
        Self {
            balances,
            pool,
            rewards,
            usd_value,
            address,
        }
    }
}

/// A protocol's evaluated positions.
///
/// `items` are in completion order, not configuration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolSummary {
    #[serde(rename = "type")]
    pub kind: ProtocolType,
    pub items: Vec<PositionRecord>,
}

impl ProtocolSummary {
    pub fn new(kind: ProtocolType) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Total USD value across every record.
    pub fn usd_value(&self) -> Decimal {
        self.items.iter().map(|item| item.usd_value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChainId;
    use std::str::FromStr;

    fn entry(usd: &str) -> ValueEntry {
        ValueEntry {
            amount: "1".to_string(),
            token: TokenDetails::new(ChainId::ARBITRUM, "0x1", "GMX", 18, "gmx"),
            unit_price: 1.0,
            usd_value: Decimal::from_str(usd).unwrap(),
        }
    }

    #[test]
    fn test_record_sums_balances_and_rewards() {
        let record = PositionRecord::new(
            "0xpos".to_string(),
            vec![entry("10.5")],
            vec![],
            vec![entry("1.25"), entry("0.000001")],
        );
        assert_eq!(record.usd_value.to_canonical_string(), "11.750001");
    }

    #[test]
    fn test_summary_serializes_type_tag() {
        let summary = ProtocolSummary::new(ProtocolType::Farms);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "farms");
        assert!(json["items"].as_array().unwrap().is_empty());
        assert!(summary.usd_value().is_zero());
    }
}
