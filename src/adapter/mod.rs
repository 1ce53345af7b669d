//! Protocol adapter: evaluates every configured position of a protocol.

use crate::chain::{require_contract, ChainReader};
use crate::config::Config;
use crate::domain::{Address, PositionDescriptor, PositionRecord, ProtocolSummary, ProtocolType};
use crate::error::{PositionError, ValuationError};
use crate::pricing::PriceFeed;
use crate::resolver::{PositionContext, PositionResolver};
use crate::valuation::USD_FRACTION_DIGITS;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{error, info};

pub mod fault;

pub use fault::{DroppedPosition, FaultSink, RecordingFaultSink, TracingFaultSink};

#[derive(Debug, Clone)]
pub struct ProtocolAdapter {
    chain: Arc<dyn ChainReader>,
    prices: Arc<dyn PriceFeed>,
    faults: Arc<dyn FaultSink>,
    usd_fraction_digits: u32,
    positions: Vec<PositionDescriptor>,
    auxiliary_contract: Option<Address>,
}

impl ProtocolAdapter {
    pub fn new(chain: Arc<dyn ChainReader>, prices: Arc<dyn PriceFeed>) -> Self {
        Self {
            chain,
            prices,
            faults: Arc::new(TracingFaultSink),
            usd_fraction_digits: USD_FRACTION_DIGITS,
            positions: Vec::new(),
            auxiliary_contract: None,
        }
    }

    /// Adapter carrying the configured positions, auxiliary fee tracker and
    /// USD precision.
    pub fn from_config(
        config: &Config,
        chain: Arc<dyn ChainReader>,
        prices: Arc<dyn PriceFeed>,
    ) -> Self {
        let mut adapter =
            Self::new(chain, prices).with_usd_fraction_digits(config.usd_fraction_digits);
        adapter.positions = config.positions.clone();
        adapter.auxiliary_contract = config.auxiliary_contract.clone();
        adapter
    }

    /// Route dropped positions to `sink` instead of the log.
    pub fn with_fault_sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.faults = sink;
        self
    }

    pub fn with_usd_fraction_digits(mut self, digits: u32) -> Self {
        self.usd_fraction_digits = digits;
        self
    }

    pub fn positions(&self) -> &[PositionDescriptor] {
        &self.positions
    }

    /// [`Self::get_staking_info`] over the positions and auxiliary contract
    /// loaded from [`Config`].
    pub async fn get_configured_staking_info(
        &self,
        holder: &Address,
    ) -> Result<ProtocolSummary, ValuationError> {
        self.get_staking_info(holder, &self.positions, None).await
    }

    /// Evaluate every position of `positions` held by `holder`.
    ///
    /// Positions run concurrently and land in `items` as they complete.
    /// A position that fails recoverably is reported to the fault sink and
    /// left out; an unrecoverable fault aborts the whole call.
    ///
    /// # Arguments
    /// * `holder` - Wallet address
    /// * `positions` - Configured positions of one protocol
    /// * `auxiliary_contract` - Default fee-reward tracker for staking
    ///   positions; `None` falls back to the configured one
    pub async fn get_staking_info(
        &self,
        holder: &Address,
        positions: &[PositionDescriptor],
        auxiliary_contract: Option<&Address>,
    ) -> Result<ProtocolSummary, ValuationError> {
        let auxiliary_contract = auxiliary_contract.or(self.auxiliary_contract.as_ref());
        let mut summary = ProtocolSummary::new(ProtocolType::Farms);
        let mut dropped = 0usize;

        let mut pending: FuturesUnordered<_> = positions
            .iter()
            .map(|descriptor| async move {
                let outcome = self
                    .evaluate_position(holder, descriptor, auxiliary_contract)
                    .await;
                (descriptor, outcome)
            })
            .collect();

        while let Some((descriptor, outcome)) = pending.next().await {
            match outcome {
                Ok(Some(record)) => summary.items.push(record),
                Ok(None) => {}
                Err(err) if err.is_recoverable() => {
                    dropped += 1;
                    self.faults.position_dropped(holder, descriptor, &err);
                }
                Err(err) => {
                    error!(
                        "Unrecoverable fault on position {} for {}: {}",
                        descriptor.name, holder, err
                    );
                    return Err(ValuationError::Unrecoverable {
                        position: descriptor.name.clone(),
                        source: err,
                    });
                }
            }
        }

        info!(
            "Evaluated {} positions for {}: {} held, {} dropped",
            positions.len(),
            holder,
            summary.items.len(),
            dropped
        );
        Ok(summary)
    }

    async fn evaluate_position(
        &self,
        holder: &Address,
        descriptor: &PositionDescriptor,
        auxiliary_contract: Option<&Address>,
    ) -> Result<Option<PositionRecord>, PositionError> {
        if descriptor.address.is_empty() {
            return Err(PositionError::MissingField {
                position: descriptor.name.clone(),
                field: "address",
            });
        }

        let contract = require_contract(
            self.chain.as_ref(),
            descriptor.chain_id,
            &descriptor.address,
            &descriptor.abi_json(),
        )?;
        let ctx = PositionContext {
            holder,
            descriptor,
            contract,
            chain: self.chain.as_ref(),
            prices: self.prices.as_ref(),
            auxiliary_contract,
            usd_fraction_digits: self.usd_fraction_digits,
        };

        PositionResolver::for_kind(descriptor.kind)
            .evaluate(&ctx)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{abi, ChainReadError, MockChainReader, MockContract};
    use crate::domain::{ChainId, Decimal, TokenDetails};
    use crate::error::MalformedNumberError;
    use crate::pricing::{MockPriceFeed, PriceFeedError, PriceQuoteTable};
    use std::str::FromStr;

    const HOLDER: &str = "0xholder";

    fn token(symbol: &str, decimals: u32, key: &str) -> TokenDetails {
        TokenDetails::new(ChainId::ARBITRUM, format!("0x{}", symbol), symbol, decimals, key)
    }

    fn farm(name: &str, address: &str) -> PositionDescriptor {
        PositionDescriptor {
            name: name.to_string(),
            protocol: "uniswap-v3".to_string(),
            chain_id: ChainId::ARBITRUM,
            address: Address::new(address),
            abi: serde_json::json!([]),
            kind: ProtocolType::Farms,
            vault_token: token("LP", 6, "lp"),
            reward_token: token("WETH", 6, "weth"),
            fee_tracker: None,
            fee_reward_token: None,
            defi_llama_id: None,
        }
    }

    fn farm_contract(deposit: u64, earned: u64) -> MockContract {
        MockContract::new()
            .with_amount(abi::BALANCE_OF, HOLDER, deposit)
            .with_amount(abi::EARNED, HOLDER, earned)
    }

    fn quotes() -> PriceQuoteTable {
        PriceQuoteTable::new()
            .with_price("lp", 2.0)
            .with_price("weth", 10.0)
    }

    fn adapter(chain: MockChainReader, feed: MockPriceFeed, sink: Arc<RecordingFaultSink>) -> ProtocolAdapter {
        ProtocolAdapter::new(Arc::new(chain), Arc::new(feed)).with_fault_sink(sink)
    }

    #[tokio::test]
    async fn test_empty_positions_give_empty_summary() {
        let sink = Arc::new(RecordingFaultSink::new());
        let adapter = adapter(MockChainReader::new(), MockPriceFeed::default(), sink.clone());
        let summary = adapter
            .get_staking_info(&Address::new(HOLDER), &[], None)
            .await
            .unwrap();
        assert_eq!(summary.kind, ProtocolType::Farms);
        assert!(summary.items.is_empty());
        assert!(sink.dropped().is_empty());
    }

    #[tokio::test]
    async fn test_blank_address_is_missing_field() {
        let sink = Arc::new(RecordingFaultSink::new());
        let adapter = adapter(MockChainReader::new(), MockPriceFeed::new(quotes()), sink.clone());
        let summary = adapter
            .get_staking_info(&Address::new(HOLDER), &[farm("blank", " ")], None)
            .await
            .unwrap();
        assert!(summary.items.is_empty());
        let dropped = sink.dropped();
        assert_eq!(dropped.len(), 1);
        assert!(matches!(
            dropped[0].error,
            PositionError::MissingField { field: "address", .. }
        ));
    }

    #[tokio::test]
    async fn test_unavailable_contract_is_dropped() {
        let sink = Arc::new(RecordingFaultSink::new());
        let chain = MockChainReader::new().with_contract(ChainId::ARBITRUM, "0xa", farm_contract(1, 1));
        let adapter = adapter(chain, MockPriceFeed::new(quotes()), sink.clone());

        let summary = adapter
            .get_staking_info(
                &Address::new(HOLDER),
                &[farm("a", "0xa"), farm("unknown", "0xb")],
                None,
            )
            .await
            .unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].address, "0xa");
        let dropped = sink.dropped();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].position, "unknown");
        assert!(matches!(
            dropped[0].error,
            PositionError::ChainRead(ChainReadError::ContractUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_price_feed_failure_drops_held_positions() {
        let sink = Arc::new(RecordingFaultSink::new());
        let chain = MockChainReader::new()
            .with_contract(ChainId::ARBITRUM, "0xa", farm_contract(1, 1))
            .with_contract(ChainId::ARBITRUM, "0xb", farm_contract(0, 0));
        let feed = MockPriceFeed::new(quotes()).with_failure(PriceFeedError::RateLimited);
        let adapter = adapter(chain, feed, sink.clone());

        let summary = adapter
            .get_staking_info(
                &Address::new(HOLDER),
                &[farm("a", "0xa"), farm("b", "0xb")],
                None,
            )
            .await
            .unwrap();
        assert!(summary.items.is_empty());
        // the empty farm never asked for prices
        assert_eq!(sink.dropped().len(), 1);
    }

    #[tokio::test]
    async fn test_usd_fraction_digits_applied() {
        let sink = Arc::new(RecordingFaultSink::new());
        let chain = MockChainReader::new().with_contract(ChainId::ARBITRUM, "0xa", farm_contract(1_000_000, 0));
        let feed = MockPriceFeed::new(PriceQuoteTable::new().with_price("lp", 1.23456));
        let config = Config {
            usd_fraction_digits: 2,
            ..Config::default()
        };
        let adapter = ProtocolAdapter::from_config(&config, Arc::new(chain), Arc::new(feed))
            .with_fault_sink(sink);

        let summary = adapter
            .get_staking_info(&Address::new(HOLDER), &[farm("a", "0xa")], None)
            .await
            .unwrap();
        assert_eq!(
            summary.items[0].balances[0].usd_value,
            Decimal::from_str("1.23").unwrap()
        );
    }

    #[tokio::test]
    async fn test_usd_overflow_drops_only_that_position() {
        let sink = Arc::new(RecordingFaultSink::new());
        let chain = MockChainReader::new()
            .with_contract(
                ChainId::ARBITRUM,
                "0xa",
                MockContract::new()
                    .with_amount(abi::BALANCE_OF, HOLDER, u128::MAX)
                    .with_amount(abi::EARNED, HOLDER, 0u64),
            )
            .with_contract(ChainId::ARBITRUM, "0xb", farm_contract(10_000_000, 0));
        let feed = MockPriceFeed::new(PriceQuoteTable::new().with_price("lp", 1e12));
        let adapter = adapter(chain, feed, sink.clone());

        let summary = adapter
            .get_staking_info(
                &Address::new(HOLDER),
                &[farm("a", "0xa"), farm("b", "0xb")],
                None,
            )
            .await
            .unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].address, "0xb");
        let dropped = sink.dropped();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].position, "a");
        assert!(matches!(
            dropped[0].error,
            PositionError::Malformed(MalformedNumberError::OutOfRange(_))
        ));
    }

    #[tokio::test]
    async fn test_wide_usd_precision_keeps_whole_values() {
        let sink = Arc::new(RecordingFaultSink::new());
        let chain = MockChainReader::new()
            .with_contract(ChainId::ARBITRUM, "0xa", farm_contract(10_000_000, 0))
            .with_contract(ChainId::ARBITRUM, "0xb", farm_contract(10_000_000, 0));
        let feed = MockPriceFeed::new(PriceQuoteTable::new().with_price("lp", 1.0));
        let adapter = adapter(chain, feed, sink.clone()).with_usd_fraction_digits(18);

        let summary = adapter
            .get_staking_info(
                &Address::new(HOLDER),
                &[farm("a", "0xa"), farm("b", "0xb")],
                None,
            )
            .await
            .unwrap();

        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.usd_value(), Decimal::from_str("20").unwrap());
        assert!(sink.dropped().is_empty());
    }

    #[tokio::test]
    async fn test_configured_positions_and_auxiliary_contract() {
        let mut staking = farm("staking", "0xs");
        staking.kind = ProtocolType::Staking;
        staking.fee_reward_token = Some(token("FEE", 6, "weth"));
        let config = Config {
            positions: vec![staking],
            auxiliary_contract: Some(Address::new("0xaux")),
            ..Config::default()
        };
        let chain = MockChainReader::new()
            .with_contract(
                ChainId::ARBITRUM,
                "0xs",
                MockContract::new()
                    .with_amount(abi::STAKED_AMOUNTS, HOLDER, 1_000_000u64)
                    .with_amount(abi::CLAIMABLE, HOLDER, 0u64),
            )
            .with_contract(
                ChainId::ARBITRUM,
                "0xaux",
                MockContract::new().with_amount(abi::CLAIMABLE, HOLDER, 500_000u64),
            );
        let adapter = ProtocolAdapter::from_config(
            &config,
            Arc::new(chain),
            Arc::new(MockPriceFeed::new(quotes())),
        );
        assert_eq!(adapter.positions().len(), 1);

        let summary = adapter
            .get_configured_staking_info(&Address::new(HOLDER))
            .await
            .unwrap();

        assert_eq!(summary.items.len(), 1);
        let fee = &summary.items[0].rewards[1];
        assert_eq!(fee.amount, "0.5");
        assert_eq!(fee.usd_value, Decimal::from_str("5").unwrap());
    }
}
