//! Decimal-safe valuation of on-chain amounts.

pub mod math;
pub mod usd;

pub use math::{
    fallback_estimate, multiply, multiply_by_ratio, multiply_by_ratio_with_digits,
    multiply_decimal, RATIO_FRACTION_DIGITS,
};
pub use usd::{
    resolve_usd_value, resolve_usd_value_with_digits, truncate_fraction_digits, UsdValuation,
    USD_FRACTION_DIGITS,
};
