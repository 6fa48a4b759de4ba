//! Type-safe price representation.
//!
//! Prices are whole amounts of the store currency (Vietnamese đồng, which has
//! no subdivision in circulation), so they are held as a non-negative integer
//! count of minor units. Admin input arrives as free text and is parsed with
//! decimal arithmetic so that `"199000"`, `"199000.0"` and `"1.99e5"` all
//! denote the same price.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

/// Currency suffix used when formatting prices.
const CURRENCY_SYMBOL: &str = "₫";

/// Errors that can occur when parsing a price from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("price cannot be empty")]
    Empty,

    #[error("price is not a number: {0}")]
    NotANumber(String),

    #[error("price cannot be negative")]
    Negative,

    #[error("price is too large")]
    Overflow,
}

/// A non-negative price in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a price from a count of minor units.
    #[must_use]
    pub const fn from_minor(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Parse a price from free-form user input.
    ///
    /// Accepts plain and scientific decimal notation. Fractional amounts are
    /// rounded to the nearest whole unit, halves away from zero.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the input is empty, not a finite number,
    /// negative, or exceeds the representable range.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative);
        }

        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Multiply by a quantity, saturating at the maximum representable price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl fmt::Display for Price {
    /// Formats with `.` thousands separators, e.g. `199.000 ₫`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped} {CURRENCY_SYMBOL}")
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Price {
    /// Accepts any non-negative JSON number; fractional values are rounded.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        if !raw.is_finite() || raw < 0.0 {
            return Err(serde::de::Error::custom(format!("invalid price: {raw}")));
        }
        let value = Decimal::from_f64_retain(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {raw}")))?;
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("price is too large"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(Price::parse("199000").unwrap(), Price::from_minor(199_000));
        assert_eq!(Price::parse(" 0 ").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_decimal_and_scientific() {
        assert_eq!(Price::parse("1.5").unwrap(), Price::from_minor(2));
        assert_eq!(Price::parse("1.4").unwrap(), Price::from_minor(1));
        assert_eq!(Price::parse("1.99e5").unwrap(), Price::from_minor(199_000));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber(_))));
        assert!(matches!(Price::parse("NaN"), Err(PriceError::NotANumber(_))));
        assert!(matches!(
            Price::parse("Infinity"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Price::parse("-0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_minor(0).to_string(), "0 ₫");
        assert_eq!(Price::from_minor(999).to_string(), "999 ₫");
        assert_eq!(Price::from_minor(199_000).to_string(), "199.000 ₫");
        assert_eq!(Price::from_minor(1_234_567).to_string(), "1.234.567 ₫");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_minor(100_000).times(2), Price::from_minor(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_minor(200_005));
        assert_eq!(Price::from_minor(u64::MAX).times(2).minor_units(), u64::MAX);
    }

    #[test]
    fn test_deserialize_accepts_float() {
        let p: Price = serde_json::from_str("199000.0").unwrap();
        assert_eq!(p, Price::from_minor(199_000));
        assert!(serde_json::from_str::<Price>("-5").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "199000");
    }
}
