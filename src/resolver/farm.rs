//! Liquidity farms: deposited LP tokens and earned reward.

use super::PositionContext;
use crate::chain::abi;
use crate::domain::PositionRecord;
use crate::error::PositionError;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FarmResolver;

impl FarmResolver {
    pub async fn evaluate(
        &self,
        ctx: &PositionContext<'_>,
    ) -> Result<Option<PositionRecord>, PositionError> {
        let descriptor = ctx.descriptor;

        let deposit = ctx.read(abi::BALANCE_OF).await?;
        if deposit.is_zero() {
            debug!("No deposit in {} for {}", descriptor.name, ctx.holder);
            return Ok(None);
        }

        let tokens = [descriptor.vault_token.clone(), descriptor.reward_token.clone()];
        let (earned, quotes) = futures::try_join!(ctx.read(abi::EARNED), ctx.quotes(&tokens))?;

        let balances = vec![ctx.value_entry(&quotes, &descriptor.vault_token, &deposit)?];
        let rewards = vec![ctx.value_entry(&quotes, &descriptor.reward_token, &earned)?];

        Ok(Some(PositionRecord::new(
            descriptor.address.to_string(),
            balances,
            vec![descriptor.vault_token.clone()],
            rewards,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::chain::{abi, MockChainReader, MockContract};
    use crate::domain::{ChainId, Decimal, ProtocolType};
    use crate::pricing::{MockPriceFeed, PriceQuoteTable};
    use std::str::FromStr;

    #[tokio::test]
    async fn test_farm_deposit_and_earned() {
        let mut descriptor = descriptor(ProtocolType::Farms);
        descriptor.reward_token = weth();
        descriptor.defi_llama_id = Some("a1b2c3".to_string());
        let chain = MockChainReader::new().with_contract(
            ChainId::ARBITRUM,
            POSITION,
            MockContract::new()
                .with_amount(abi::BALANCE_OF, HOLDER, units("3"))
                .with_amount(abi::EARNED, HOLDER, units("0.0000001")),
        );
        let feed = MockPriceFeed::new(
            PriceQuoteTable::new()
                .with_price("gmx", 1.0)
                .with_price("weth", 1234.5678),
        );

        let record = evaluate(&descriptor, &chain, &feed, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.balances[0].amount, "3");
        assert_eq!(record.balances[0].usd_value, Decimal::from_str("3").unwrap());
        assert_eq!(record.rewards[0].amount, "0.0000001");
        // 0.00012345678 truncated to 6 digits
        assert_eq!(
            record.rewards[0].usd_value,
            Decimal::from_str("0.000123").unwrap()
        );
    }

    #[tokio::test]
    async fn test_farm_without_deposit_is_dropped() {
        let descriptor = descriptor(ProtocolType::Farms);
        let chain = MockChainReader::new().with_contract(
            ChainId::ARBITRUM,
            POSITION,
            MockContract::new()
                .with_amount(abi::BALANCE_OF, HOLDER, 0u64)
                .with_amount(abi::EARNED, HOLDER, units("1")),
        );
        let feed = MockPriceFeed::new(PriceQuoteTable::new());

        assert!(evaluate(&descriptor, &chain, &feed, None)
            .await
            .unwrap()
            .is_none());
    }
}
