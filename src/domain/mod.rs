//! Domain types for position valuation.
//!
//! This module provides:
//! - Arbitrary-precision on-chain amounts via RawAmount
//! - USD values via the Decimal wrapper
//! - Primitives: Address, ChainId, ProtocolType
//! - Configuration types (TokenDetails, PositionDescriptor) and the
//!   normalized output (ValueEntry, PositionRecord, ProtocolSummary)

pub mod amount;
pub mod decimal;
pub mod position;
pub mod primitives;
pub mod record;
pub mod token;

pub use amount::{AmountParseError, RawAmount};
pub use decimal::Decimal;
pub use position::PositionDescriptor;
pub use primitives::{Address, ChainId, ProtocolType};
pub use record::{PositionRecord, ProtocolSummary, ValueEntry};
pub use token::TokenDetails;
