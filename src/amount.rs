//! Monetary amounts written with a comma as the decimal separator.
//!
//! The billing exports write `"10,50"` where a Rust parser expects `"10.50"`.
//! `Amount` wraps `rust_decimal::Decimal` so the arithmetic stays exact and
//! only the textual form deals with the separator.

use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A fixed-point amount parsed from comma-decimal text.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use holded_export::Amount;
///
/// let amount = Amount::from_str("10,5").unwrap();
/// assert_eq!(amount.to_comma_string(2), "10,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// One, used as the base of `1 + rate` divisors.
    pub const ONE: Self = Amount(Decimal::ONE);

    /// Builds an amount from an integer mantissa and a scale, e.g. `(21, 2)` is `0.21`.
    pub const fn from_parts(mantissa: i64, scale: u32) -> Self {
        Amount(Decimal::from_parts(
            mantissa.unsigned_abs() as u32,
            (mantissa.unsigned_abs() >> 32) as u32,
            0,
            mantissa < 0,
            scale,
        ))
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Division that yields `None` instead of panicking on zero or overflow.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.0.checked_div(rhs.0).map(Amount)
    }

    /// Rounds to `places` decimals, halves away from zero.
    pub fn round(self, places: u32) -> Self {
        Amount(
            self.0
                .round_dp_with_strategy(places, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Formats with exactly `places` decimals and a comma separator.
    pub fn to_comma_string(&self, places: u32) -> String {
        let rounded = self.round(places);
        format!("{:.*}", places as usize, rounded.0).replace('.', ",")
    }
}

/// Error returned when an amount field is not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAmountError(String);

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a decimal amount: {:?}", self.0)
    }
}

impl std::error::Error for ParseAmountError {}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses `"1234,56"`. A blank field is zero.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::ZERO);
        }
        let normalized = trimmed.replacen(',', ".", 1);
        Decimal::from_str(&normalized)
            .map(Amount)
            .map_err(|_| ParseAmountError(trimmed.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Mul for Amount {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Amount(self.0 * rhs.0)
    }
}
