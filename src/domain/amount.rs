//! On-chain token quantities in their smallest unit.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Arbitrary-precision non-negative token quantity, as stored on-chain.
///
/// Carries no exponent of its own: it is only meaningful next to the
/// `decimals` of the token it was read for.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawAmount(BigUint);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("Invalid integer amount: {0}")]
    InvalidInteger(String),
    #[error("Invalid decimal amount: {0}")]
    InvalidDecimal(String),
    #[error("Amount {value} has more than {decimals} fractional digits")]
    TooPrecise { value: String, decimals: u32 },
    #[error("Amount must not be negative: {0}")]
    Negative(String),
}

impl RawAmount {
    pub fn new(value: BigUint) -> Self {
        RawAmount(value)
    }

    pub fn zero() -> Self {
        RawAmount(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn inner(&self) -> &BigUint {
        &self.0
    }

    /// Convert a human-readable decimal (e.g. `"1.5"`) into raw units.
    ///
    /// Fails rather than truncating when the input has more fractional
    /// digits than the token supports.
    pub fn parse_units(value: &str, decimals: u32) -> Result<Self, AmountParseError> {
        let parsed = BigDecimal::from_str(value.trim())
            .map_err(|_| AmountParseError::InvalidDecimal(value.to_string()))?;
        let (digits, scale) = parsed.as_bigint_and_exponent();
        let shift = decimals as i64 - scale;
        let scaled = if shift >= 0 {
            digits * BigInt::from(pow10(shift as u32))
        } else {
            let divisor = BigInt::from(pow10((-shift) as u32));
            if !(&digits % &divisor).is_zero() {
                return Err(AmountParseError::TooPrecise {
                    value: value.to_string(),
                    decimals,
                });
            }
            digits / divisor
        };
        scaled
            .to_biguint()
            .map(RawAmount)
            .ok_or_else(|| AmountParseError::Negative(value.to_string()))
    }

    /// Exact decimal rendering using `decimals` as exponent.
    ///
    /// Trailing fractional zeros are dropped: `1500000` with 6 decimals
    /// renders as `"1.5"`, zero renders as `"0"`.
    pub fn to_exact(&self, decimals: u32) -> String {
        let digits = self.0.to_string();
        let decimals = decimals as usize;
        if decimals == 0 {
            return digits;
        }
        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.is_empty() {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, frac_part)
        }
    }

    /// The amount as a decimal with `decimals` fractional digits.
    pub fn to_big_decimal(&self, decimals: u32) -> BigDecimal {
        BigDecimal::new(BigInt::from(self.0.clone()), decimals as i64)
    }

    /// `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &RawAmount) -> RawAmount {
        if other.0 >= self.0 {
            RawAmount::zero()
        } else {
            RawAmount(&self.0 - &other.0)
        }
    }

    /// Move the amount between two decimal domains.
    ///
    /// Scaling up is exact; scaling down drops the units that cannot be
    /// represented with fewer decimals.
    pub fn rescale(&self, from_decimals: u32, to_decimals: u32) -> RawAmount {
        if to_decimals >= from_decimals {
            RawAmount(&self.0 * pow10(to_decimals - from_decimals))
        } else {
            RawAmount(&self.0 / pow10(from_decimals - to_decimals))
        }
    }
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RawAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s.trim())
            .map(RawAmount)
            .map_err(|_| AmountParseError::InvalidInteger(s.to_string()))
    }
}

impl From<u64> for RawAmount {
    fn from(value: u64) -> Self {
        RawAmount(BigUint::from(value))
    }
}

impl From<u128> for RawAmount {
    fn from(value: u128) -> Self {
        RawAmount(BigUint::from(value))
    }
}

impl From<BigUint> for RawAmount {
    fn from(value: BigUint) -> Self {
        RawAmount(value)
    }
}

// Encoded as a decimal string: uint256 values do not survive a JSON number.
impl Serialize for RawAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RawAmount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
