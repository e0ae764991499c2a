//! Money type for representing expense amounts
//!
//! Wraps an exact decimal so that amounts keep their full input precision and
//! totals never drift the way binary floating point does. Two-decimal
//! formatting only happens at the edges (CSV, display).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary amount held as an exact decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from hundredths of the currency unit
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_fixed(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Wrap an existing decimal value
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// A zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal, at full precision
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is below zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Parse an amount as typed by a user or stored in a file
    ///
    /// Accepts plain decimal notation ("10", "10.5", "0.125", "-3.00").
    /// Surrounding whitespace is ignored; the sign is not checked here.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(trimmed.to_string()))
    }

    /// Format with exactly two fraction digits, rounding half away from zero
    pub fn to_fixed(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(2);
        rounded.to_string()
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let fixed = self.to_fixed();
        match fixed.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", symbol, magnitude),
            None => format!("{}{}", symbol, fixed),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.to_fixed(), "10.50");
        assert_eq!(Money::from_cents(5).to_fixed(), "0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse(" 10.5 ").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("10").unwrap(), Money::from_cents(1000));
        assert_eq!(Money::parse("-3").unwrap(), Money::from_cents(-300));
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1,000").is_err());
    }

    #[test]
    fn test_full_precision_retained() {
        let m = Money::parse("0.125").unwrap();
        assert_eq!(m.as_decimal().to_string(), "0.125");
        assert_eq!(m.to_fixed(), "0.13");
    }

    #[test]
    fn test_fixed_rounds_half_up() {
        assert_eq!(Money::parse("2.345").unwrap().to_fixed(), "2.35");
        assert_eq!(Money::parse("2.344").unwrap().to_fixed(), "2.34");
        assert_eq!(Money::parse("7").unwrap().to_fixed(), "7.00");
        assert_eq!(Money::parse("-0.001").unwrap().to_fixed(), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(1050).format_with_symbol("₹"), "₹10.50");
        assert_eq!(Money::from_cents(-1050).format_with_symbol("$"), "-$10.50");
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::parse("-0").unwrap().is_negative());
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Money = std::iter::repeat(Money::parse("0.1").unwrap())
            .take(10)
            .sum();
        assert_eq!(total, Money::from_cents(100));

        let amounts = vec![
            Money::from_cents(1000),
            Money::from_cents(2050),
            Money::from_cents(0),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.to_fixed(), "30.50");
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
