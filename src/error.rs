use crate::chain::ChainReadError;
use crate::pricing::PriceFeedError;
use thiserror::Error;

/// A USD value could not be turned into a [`crate::domain::Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedNumberError {
    /// Text this crate produced itself is not a number: a broken invariant.
    #[error("Not a decimal number: {0:?}")]
    NotANumber(String),
    /// The value is too large for the USD decimal type. Follows from the
    /// on-chain amount and price, so only the position is lost.
    #[error("Decimal out of range: {0}")]
    OutOfRange(String),
}

/// Why a single position could not be evaluated.
#[derive(Debug, Clone, Error)]
pub enum PositionError {
    #[error("Position {position} is missing required field {field}")]
    MissingField {
        position: String,
        field: &'static str,
    },
    #[error(transparent)]
    ChainRead(#[from] ChainReadError),
    #[error(transparent)]
    PriceFeed(#[from] PriceFeedError),
    #[error(transparent)]
    Malformed(#[from] MalformedNumberError),
}

impl PositionError {
    /// Recoverable faults drop the position; the rest abort the batch.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PositionError::Malformed(MalformedNumberError::NotANumber(_))
        )
    }
}

/// Failure of a whole valuation call.
///
/// Only unrecoverable position faults end up here; everything else is
/// dropped at the position boundary.
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Position {position} hit an unrecoverable fault: {source}")]
    Unrecoverable {
        position: String,
        #[source]
        source: PositionError,
    },
}
