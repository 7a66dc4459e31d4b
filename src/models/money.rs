//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so amounts keep whatever precision they were
//! entered with. The `Display` form is the plain number with no symbol and no
//! thousands separators, which is also what gets persisted and exported.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Symbols stripped from the front of an amount before it is parsed.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '₹', '€', '£'];

/// Represents a monetary amount as an exact decimal number
///
/// # Examples
/// ```
/// use expense_ledger::models::Money;
/// let amount = Money::parse("₹1,250.75").unwrap();
/// assert_eq!(amount.to_string(), "1250.75");
/// assert_eq!(amount.format_with_symbol("₹"), "₹1250.75");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(1050);
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative (zero is neither positive nor negative)
    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }

    /// Add two amounts, returning `None` if the result does not fit
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let five = Money::from_cents(500);
    /// assert_eq!(five.checked_add(five), Some(Money::from_cents(1000)));
    ///
    /// let max = Money::parse("79228162514264337593543950335").unwrap();
    /// assert_eq!(max.checked_add(five), None);
    /// ```
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "₹1,000", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.trim_start_matches(&CURRENCY_SYMBOLS[..]).replace(',', "");

        let value = Decimal::from_str(rest.trim())
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, rounded to two decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{symbol}{rounded:.2}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1050), money("10.50"));
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_display_keeps_full_precision() {
        assert_eq!(money("10.50").to_string(), "10.50");
        assert_eq!(money("0.125").to_string(), "0.125");
        assert_eq!(money("1234567.5").to_string(), "1234567.5");
        assert_eq!(money("20").to_string(), "20");
    }

    #[test]
    fn test_parse() {
        assert_eq!(money("$10.50"), money("10.50"));
        assert_eq!(money("₹1,000"), money("1000"));
        assert_eq!(money(" 7.25 "), Money::from_cents(725));
        assert!(money("-10.50").is_negative());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(money("10.5").format_with_symbol("₹"), "₹10.50");
        assert_eq!(money("0.125").format_with_symbol("$"), "$0.13");
        assert_eq!(money("-3").format_with_symbol("$"), "-$3.00");
    }

    #[test]
    fn test_checked_add() {
        let a = money("100");
        let b = money("50.25");
        assert_eq!(a.checked_add(b), Some(money("150.25")));
        assert_eq!(money("0.1").checked_add(money("0.2")), Some(money("0.3")));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = money("79228162514264337593543950335");
        assert_eq!(max.checked_add(money("1")), None);
        assert_eq!(max.checked_add(Money::zero()), Some(max));
    }

    #[test]
    fn test_zero_is_not_negative() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(!money("-0").is_negative());
    }

    #[test]
    fn test_serialization() {
        let m = money("10.50");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
