//! USD valuation of raw amounts against a quote snapshot.

use crate::domain::{Decimal, RawAmount, TokenDetails};
use crate::error::MalformedNumberError;
use crate::pricing::PriceQuoteTable;
use crate::valuation::math::multiply;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// Default number of fractional digits kept on USD values.
pub const USD_FRACTION_DIGITS: u32 = 6;

/// Price used and resulting USD value for one amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsdValuation {
    pub unit_price: f64,
    pub usd_value: Decimal,
}

impl UsdValuation {
    pub fn unpriced() -> Self {
        Self {
            unit_price: 0.0,
            usd_value: Decimal::zero(),
        }
    }
}

/// Value `amount` of `token` in USD, truncated to [`USD_FRACTION_DIGITS`].
pub fn resolve_usd_value(
    quotes: &PriceQuoteTable,
    token: &TokenDetails,
    amount: &RawAmount,
) -> Result<UsdValuation, MalformedNumberError> {
    resolve_usd_value_with_digits(quotes, token, amount, USD_FRACTION_DIGITS)
}

/// [`resolve_usd_value`] with an explicit fractional digit limit.
///
/// A token without a quote is unpriced (`0`/`0`). A zero amount keeps the
/// quoted price but never goes through the multiplication.
pub fn resolve_usd_value_with_digits(
    quotes: &PriceQuoteTable,
    token: &TokenDetails,
    amount: &RawAmount,
    fraction_digits: u32,
) -> Result<UsdValuation, MalformedNumberError> {
    let Some(quote) = quotes.get(&token.price_feed_key) else {
        return Ok(UsdValuation::unpriced());
    };
    if amount.is_zero() {
        return Ok(UsdValuation {
            unit_price: quote.usd,
            usd_value: Decimal::zero(),
        });
    }

    let value = multiply(amount, quote.usd);
    let usd_value = truncate_fraction_digits(&value.to_exact(token.decimals), fraction_digits)?;
    Ok(UsdValuation {
        unit_price: quote.usd,
        usd_value,
    })
}

/// Keep at most `digits` fractional digits of a decimal string, without
/// rounding. The sign is kept; exponent notation is expanded first.
///
/// `truncate_fraction_digits("123.1234569", 6)` is `123.123456`. Trailing
/// zeros are dropped, so `digits` never widens a value past what it needs.
pub fn truncate_fraction_digits(value: &str, digits: u32) -> Result<Decimal, MalformedNumberError> {
    let parsed = BigDecimal::from_str(value.trim())
        .map_err(|_| MalformedNumberError::NotANumber(value.to_string()))?;
    let (mantissa, scale) = parsed
        .with_scale_round(digits as i64, RoundingMode::Down)
        .normalized()
        .into_bigint_and_exponent();
    // normalized() turns 100 into 1e2; the USD type wants a non-negative scale
    let (mantissa, scale) = if scale < 0 {
        (mantissa * BigInt::from(10u32).pow(scale.unsigned_abs() as u32), 0)
    } else {
        (mantissa, scale)
    };
    mantissa
        .to_i128()
        .and_then(|m| Decimal::from_i128_with_scale(m, scale as u32))
        .ok_or_else(|| MalformedNumberError::OutOfRange(value.to_string()))
}
