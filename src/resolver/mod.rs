//! Position-type resolvers.
//!
//! Each resolver reads the chain state of one kind of position and shapes
//! it into a [`PositionRecord`]. `Ok(None)` means the position holds nothing
//! for the wallet and is left out of the summary.

use crate::chain::{ChainReader, ReadContract};
use crate::domain::{
    Address, PositionDescriptor, PositionRecord, ProtocolType, RawAmount, TokenDetails,
    ValueEntry,
};
use crate::error::PositionError;
use crate::pricing::{PriceFeed, PriceQuoteTable};
use crate::valuation::resolve_usd_value_with_digits;
use std::sync::Arc;
use tracing::debug;

pub mod farm;
pub mod staking;
pub mod vesting;

pub use farm::FarmResolver;
pub use staking::StakingResolver;
pub use vesting::VestingResolver;

/// Everything a resolver needs to evaluate one position.
#[derive(Debug)]
pub struct PositionContext<'a> {
    pub holder: &'a Address,
    pub descriptor: &'a PositionDescriptor,
    /// Handle on the position's own contract.
    pub contract: Arc<dyn ReadContract>,
    pub chain: &'a dyn ChainReader,
    pub prices: &'a dyn PriceFeed,
    /// Protocol-level fee tracker for staking positions without their own.
    pub auxiliary_contract: Option<&'a Address>,
    pub usd_fraction_digits: u32,
}

impl PositionContext<'_> {
    /// Read `method(holder)` on the position contract.
    pub async fn read(&self, method: &str) -> Result<RawAmount, PositionError> {
        let amount = self.contract.call_amount(method, self.holder).await?;
        debug!(
            "Read {}({}) on {} = {}",
            method, self.holder, self.descriptor.address, amount
        );
        Ok(amount)
    }

    /// Fetch quotes for every token of the position in one request.
    pub async fn quotes(&self, tokens: &[TokenDetails]) -> Result<PriceQuoteTable, PositionError> {
        let quotes = self.prices.get_prices(tokens).await?;
        debug!(
            "Fetched {} quotes for {} tokens of {}",
            quotes.len(),
            tokens.len(),
            self.descriptor.name
        );
        Ok(quotes)
    }

    /// Price `amount` of `token` into a ValueEntry.
    pub fn value_entry(
        &self,
        quotes: &PriceQuoteTable,
        token: &TokenDetails,
        amount: &RawAmount,
    ) -> Result<ValueEntry, PositionError> {
        let valuation =
            resolve_usd_value_with_digits(quotes, token, amount, self.usd_fraction_digits)?;
        Ok(ValueEntry {
            amount: amount.to_exact(token.decimals),
            token: token.clone(),
            unit_price: valuation.unit_price,
            usd_value: valuation.usd_value,
        })
    }

    pub(crate) fn missing(&self, field: &'static str) -> PositionError {
        PositionError::MissingField {
            position: self.descriptor.name.clone(),
            field,
        }
    }
}

/// Closed set of resolvers, one per [`ProtocolType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionResolver {
    Farm(FarmResolver),
    Staking(StakingResolver),
    Vesting(VestingResolver),
}

impl PositionResolver {
    pub fn for_kind(kind: ProtocolType) -> Self {
        match kind {
            ProtocolType::Farms => PositionResolver::Farm(FarmResolver),
            ProtocolType::Staking => PositionResolver::Staking(StakingResolver),
            ProtocolType::Vesting => PositionResolver::Vesting(VestingResolver),
        }
    }

    pub async fn evaluate(
        &self,
        ctx: &PositionContext<'_>,
    ) -> Result<Option<PositionRecord>, PositionError> {
        match self {
            PositionResolver::Farm(r) => r.evaluate(ctx).await,
            PositionResolver::Staking(r) => r.evaluate(ctx).await,
            PositionResolver::Vesting(r) => r.evaluate(ctx).await,
        }
    }
}
