//! Staking positions: stake, primary reward and optional fee reward.

use super::PositionContext;
use crate::chain::{abi, require_contract, ReadContract};
use crate::domain::{Address, PositionRecord, TokenDetails};
use crate::error::PositionError;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StakingResolver;

impl StakingResolver {
    pub async fn evaluate(
        &self,
        ctx: &PositionContext<'_>,
    ) -> Result<Option<PositionRecord>, PositionError> {
        let descriptor = ctx.descriptor;
        let fee_stream = fee_stream(ctx)?;

        let staked = ctx.read(abi::STAKED_AMOUNTS).await?;
        if staked.is_zero() {
            debug!("Nothing staked in {} by {}", descriptor.name, ctx.holder);
            return Ok(None);
        }

        let fee_contract: Option<(Arc<dyn ReadContract>, &TokenDetails)> = match fee_stream {
            Some((tracker, token)) => Some((
                require_contract(
                    ctx.chain,
                    descriptor.chain_id,
                    &tracker,
                    abi::REWARD_TRACKER_ABI,
                )?,
                token,
            )),
            None => None,
        };

        let mut tokens = vec![descriptor.vault_token.clone(), descriptor.reward_token.clone()];
        if let Some((_, token)) = &fee_contract {
            tokens.push((*token).clone());
        }

        let fee_read = async {
            match &fee_contract {
                Some((contract, _)) => contract
                    .call_amount(abi::CLAIMABLE, ctx.holder)
                    .await
                    .map(Some)
                    .map_err(PositionError::from),
                None => Ok(None),
            }
        };
        let (reward, fee_reward, quotes) =
            futures::try_join!(ctx.read(abi::CLAIMABLE), fee_read, ctx.quotes(&tokens))?;

        let balances = vec![ctx.value_entry(&quotes, &descriptor.vault_token, &staked)?];
        let mut rewards = vec![ctx.value_entry(&quotes, &descriptor.reward_token, &reward)?];
        if let (Some((_, token)), Some(amount)) = (&fee_contract, fee_reward.as_ref()) {
            rewards.push(ctx.value_entry(&quotes, token, amount)?);
        }

        Ok(Some(PositionRecord::new(
            descriptor.address.to_string(),
            balances,
            vec![descriptor.vault_token.clone()],
            rewards,
        )))
    }
}

/// Fee tracker address and fee reward token, when the position has one.
///
/// A tracker without a token (or a token with nowhere to read it from) is
/// a misconfigured descriptor.
fn fee_stream<'a>(
    ctx: &PositionContext<'a>,
) -> Result<Option<(Address, &'a TokenDetails)>, PositionError> {
    let descriptor = ctx.descriptor;
    let tracker = descriptor
        .fee_tracker
        .as_ref()
        .filter(|address| !address.is_empty());
    match (tracker, descriptor.fee_reward_token.as_ref()) {
        (None, None) => Ok(None),
        (Some(tracker), Some(token)) => Ok(Some((tracker.clone(), token))),
        (None, Some(token)) => ctx
            .auxiliary_contract
            .filter(|address| !address.is_empty())
            .map(|aux| Some((aux.clone(), token)))
            .ok_or_else(|| ctx.missing("feeTracker")),
        (Some(_), None) => Err(ctx.missing("feeRewardToken")),
    }
}
