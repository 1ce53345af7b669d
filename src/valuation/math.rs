//! Fixed-point multiplication of raw on-chain amounts.
//!
//! Products are truncated toward zero: there is no fractional on-chain
//! unit to round to.

use crate::domain::RawAmount;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigUint;
use std::str::FromStr;
use tracing::warn;

/// Default number of fractional digits kept when rendering a ratio.
pub const RATIO_FRACTION_DIGITS: u32 = 16;

/// Multiply `amount` by a floating-point `factor` (typically a USD price).
///
/// The factor is taken at its shortest round-trip decimal form, so `0.29`
/// multiplies as exactly `0.29`. A factor that cannot produce an amount
/// (NaN, infinite, negative) yields the 99% estimate of
/// [`fallback_estimate`].
pub fn multiply(amount: &RawAmount, factor: f64) -> RawAmount {
    match BigDecimal::from_str(&factor.to_string()) {
        Ok(factor) => multiply_decimal(amount, &factor),
        Err(e) => {
            warn!(
                "Cannot multiply amount {} by factor {}: {}, using 99% estimate",
                amount, factor, e
            );
            fallback_estimate(amount)
        }
    }
}

/// Multiply `amount` by an exact decimal `factor`, truncating the product.
pub fn multiply_decimal(amount: &RawAmount, factor: &BigDecimal) -> RawAmount {
    match try_multiply(amount, factor) {
        Some(product) => product,
        None => {
            warn!(
                "Product of amount {} and factor {} is not a valid amount, using 99% estimate",
                amount, factor
            );
            fallback_estimate(amount)
        }
    }
}

/// Multiply `amount` by `ratio / 10^ratio_decimals`.
///
/// The ratio is cut to [`RATIO_FRACTION_DIGITS`] fractional digits first.
pub fn multiply_by_ratio(amount: &RawAmount, ratio: &RawAmount, ratio_decimals: u32) -> RawAmount {
    multiply_by_ratio_with_digits(amount, ratio, ratio_decimals, RATIO_FRACTION_DIGITS)
}

/// [`multiply_by_ratio`] with an explicit fractional digit limit.
pub fn multiply_by_ratio_with_digits(
    amount: &RawAmount,
    ratio: &RawAmount,
    ratio_decimals: u32,
    fraction_digits: u32,
) -> RawAmount {
    let factor = ratio
        .to_big_decimal(ratio_decimals)
        .with_scale_round(fraction_digits as i64, RoundingMode::Down);
    multiply_decimal(amount, &factor)
}

/// The degraded value used when a multiplication fails: `amount - amount / 100`.
pub fn fallback_estimate(amount: &RawAmount) -> RawAmount {
    let value = amount.inner();
    RawAmount::new(value - value / BigUint::from(100u32))
}

fn try_multiply(amount: &RawAmount, factor: &BigDecimal) -> Option<RawAmount> {
    let product = amount.to_big_decimal(0) * factor;
    let (digits, _) = product
        .with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent();
    digits.to_biguint().map(RawAmount::new)
}
