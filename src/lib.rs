pub mod adapter;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod pricing;
pub mod resolver;
pub mod valuation;

pub use adapter::{FaultSink, ProtocolAdapter, RecordingFaultSink, TracingFaultSink};
pub use chain::{ChainReadError, ChainReader, MockChainReader, MockContract, ReadContract};
pub use config::Config;
pub use domain::{
    Address, ChainId, Decimal, PositionDescriptor, PositionRecord, ProtocolSummary, ProtocolType,
    RawAmount, TokenDetails, ValueEntry,
};
pub use error::{MalformedNumberError, PositionError, ValuationError};
pub use pricing::{MockPriceFeed, PriceFeed, PriceFeedError, PriceQuote, PriceQuoteTable};
