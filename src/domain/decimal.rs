//! USD value type backed by rust_decimal.
//!
//! Values are produced by truncation only, so equality is exact and stable
//! across repeated valuations of the same inputs.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Fixed-point USD amount.
///
/// Serializes to a JSON number, the shape downstream reporting expects.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Build a value from an integer mantissa and a fractional scale.
    ///
    /// Returns `None` when the mantissa does not fit 96 bits or the scale
    /// exceeds 28.
    pub fn from_i128_with_scale(mantissa: i128, scale: u32) -> Option<Self> {
        RustDecimal::try_from_i128_with_scale(mantissa, scale)
            .ok()
            .map(Decimal)
    }

    /// Parse a Decimal from a string losslessly.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Format without trailing zeros and without exponent notation.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mantissa_and_scale() {
        let d = Decimal::from_i128_with_scale(123_456_789, 6).unwrap();
        assert_eq!(d.to_canonical_string(), "123.456789");
    }

    #[test]
    fn test_from_mantissa_overflow() {
        assert!(Decimal::from_i128_with_scale(i128::MAX, 6).is_none());
        assert!(Decimal::from_i128_with_scale(1, 29).is_none());
    }

    #[test]
    fn test_canonical_string_drops_trailing_zeros() {
        let d = Decimal::from_i128_with_scale(1_500_000, 6).unwrap();
        assert_eq!(d.to_canonical_string(), "1.5");
        assert!(!d.to_canonical_string().contains('e'));
    }

    #[test]
    fn test_sum() {
        let values = vec![
            Decimal::from_str("1.25").unwrap(),
            Decimal::from_str("2.5").unwrap(),
            Decimal::zero(),
        ];
        let total: Decimal = values.iter().sum();
        assert_eq!(total.to_canonical_string(), "3.75");
    }

    #[test]
    fn test_json_serialization_is_number() {
        let decimal = Decimal::from_str_canonical("123.456").unwrap();
        let json = serde_json::to_value(decimal).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_equality_ignores_scale() {
        let a = Decimal::from_str("1.500000").unwrap();
        let b = Decimal::from_str("1.5").unwrap();
        assert_eq!(a, b);
    }
}
