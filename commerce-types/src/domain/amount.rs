//! Type-safe monetary amount fixed at two fractional digits.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// A non-negative monetary amount with currency-scale (2 decimal) precision.
///
/// The value is stored in minor units (hundredths) to avoid floating-point
/// precision issues. `50000.0` and `50000.00` normalize to the same `Amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero amount. Orders with a zero total are valid.
    pub const ZERO: Amount = Amount(0);

    /// Creates an Amount from a decimal value, normalizing to 2 fractional
    /// digits with half-up rounding.
    ///
    /// Fails with `InvalidAmount` if the value is negative or not finite.
    pub fn from_major(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidAmount(format!(
                "amount must be a finite number, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::InvalidAmount(format!(
                "amount must be >= 0, got {value}"
            )));
        }
        let minor = (value * 100.0).round();
        if minor > i64::MAX as f64 {
            return Err(DomainError::InvalidAmount(format!(
                "amount out of range: {value}"
            )));
        }
        Ok(Self(minor as i64))
    }

    /// Creates an Amount from minor units (hundredths).
    pub fn from_minor(minor: i64) -> Result<Self, DomainError> {
        if minor < 0 {
            return Err(DomainError::InvalidAmount(format!(
                "amount must be >= 0, got {} minor units",
                minor
            )));
        }
        Ok(Self(minor))
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal value.
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_normalizes_to_two_digits() {
        let amount = Amount::from_major(50000.0).unwrap();
        assert_eq!(amount.minor(), 5_000_000);
        assert_eq!(format!("{}", amount), "50000.00");
    }

    #[test]
    fn test_from_major_rounds_half_up() {
        assert_eq!(Amount::from_major(99.99).unwrap().minor(), 9999);
        assert_eq!(Amount::from_major(0.3).unwrap().minor(), 30);
    }

    #[test]
    fn test_negative_amount_fails() {
        let result = Amount::from_major(-0.01);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_non_finite_amount_fails() {
        assert!(Amount::from_major(f64::NAN).is_err());
        assert!(Amount::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let amount = Amount::from_major(0.0).unwrap();
        assert_eq!(amount, Amount::ZERO);
    }

    #[test]
    fn test_equal_after_normalization() {
        let a = Amount::from_major(42000.0).unwrap();
        let b = Amount::from_major(42000.00).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_major_round_trips() {
        let amount = Amount::from_major(50000.0).unwrap();
        assert_eq!(amount.to_major(), 50000.0);
    }
}
