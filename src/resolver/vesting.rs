//! Vesting positions: claimable part and still-vesting remainder.

use super::PositionContext;
use crate::chain::abi;
use crate::domain::PositionRecord;
use crate::error::PositionError;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VestingResolver;

impl VestingResolver {
    /// The vester reports amounts in the reward token's units. The
    /// remainder is `total - claimable` there, then moved into the vault
    /// token's units with integer arithmetic only.
    pub async fn evaluate(
        &self,
        ctx: &PositionContext<'_>,
    ) -> Result<Option<PositionRecord>, PositionError> {
        let descriptor = ctx.descriptor;
        let vault = &descriptor.vault_token;
        let reward = &descriptor.reward_token;

        let total = ctx.read(abi::BALANCE_OF).await?;
        if total.is_zero() {
            debug!("Nothing vesting in {} for {}", descriptor.name, ctx.holder);
            return Ok(None);
        }

        let tokens = [vault.clone(), reward.clone()];
        let (claimable, quotes) =
            futures::try_join!(ctx.read(abi::CLAIMABLE), ctx.quotes(&tokens))?;

        if claimable > total {
            warn!(
                "Claimable {} exceeds vesting total {} on {}, reporting no remainder",
                claimable, total, descriptor.address
            );
        }
        let remaining = total
            .saturating_sub(&claimable)
            .rescale(reward.decimals, vault.decimals);

        let balances = vec![ctx.value_entry(&quotes, vault, &remaining)?];
        let rewards = vec![ctx.value_entry(&quotes, reward, &claimable)?];

        Ok(Some(PositionRecord::new(
            descriptor.address.to_string(),
            balances,
            vec![vault.clone()],
            rewards,
        )))
    }
}
