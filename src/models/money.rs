//! Money type for representing currency amounts
//!
//! Wraps a fixed-precision decimal so that sums never accumulate
//! floating-point drift. Values keep their full precision through every
//! reduction; rounding to two fraction digits only happens when an amount
//! is displayed or serialized. Arithmetic saturates at the bounds of the
//! decimal range instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fraction digits used when presenting an amount
pub const DISPLAY_SCALE: u32 = 2;

/// Largest amount a single record may carry
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1661992960, 1808227885, 5, false, 0); // 1e20

/// Currency symbols tolerated in front of a parsed amount
const CURRENCY_SYMBOLS: [char; 2] = ['$', '৳'];

/// A currency-agnostic monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money amount from hundredths of the currency unit
    ///
    /// # Examples
    /// ```
    /// use xpense::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money amount from whole units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the exact underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount rounded for presentation (two digits, midpoint away from zero)
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "৳10", "0.125".
    /// Precision beyond two digits is kept.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, trimmed),
        };
        let rest = rest
            .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
            .unwrap_or(rest)
            .trim_start();

        if rest.is_empty() || rest.starts_with(['-', '+']) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(rest)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, rounded for presentation
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs())
        } else {
            format!("{}{}", symbol, self)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
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

// Serialized amounts are a presentation boundary: always two digits, as a
// string. Deserializing keeps whatever precision the input has, so a value
// that went through `Serialize` comes back rounded.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self)
    }
}

/// Error type for money parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.amount(), Decimal::new(1050, 2));
        assert_eq!(m, Money::parse("10.5").unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
        assert_eq!(format!("{}", Money::from_units(80)), "80.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Money::parse("0.125").unwrap().to_string(), "0.13");
        assert_eq!(Money::parse("-0.125").unwrap().to_string(), "-0.13");
        assert_eq!(Money::parse("2.3449").unwrap().to_string(), "2.34");
    }

    #[test]
    fn test_no_accumulation_drift() {
        let total: Money = (0..10).map(|_| Money::parse("0.1").unwrap()).sum();
        assert_eq!(total, Money::from_units(1));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(-a, Money::from_cents(-1000));
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("৳ 200").unwrap(), Money::from_units(200));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse(" 7 ").unwrap(), Money::from_units(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(1050).format_with_symbol("৳"), "৳10.50");
        assert_eq!(Money::from_cents(-1050).format_with_symbol("$"), "-$10.50");
    }

    #[test]
    fn test_serialization() {
        let m = Money::parse("10.505").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.51\"");

        let deserialized: Money = serde_json::from_str("\"10.50\"").unwrap();
        assert_eq!(deserialized, Money::from_cents(1050));
    }

    #[test]
    fn test_deserialize_keeps_precision() {
        let from_text: Money = serde_json::from_str("\"12.345\"").unwrap();
        assert_eq!(from_text.amount(), Decimal::new(12345, 3));
        let from_number: Money = serde_json::from_str("7").unwrap();
        assert_eq!(from_number, Money::from_units(7));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max + max, max);

        let mut total = max;
        total += Money::from_units(1);
        assert_eq!(total, max);

        let min = Money::from_decimal(Decimal::MIN);
        assert_eq!(min - max, min);
    }

    #[test]
    fn test_max_amount() {
        assert_eq!(MAX_AMOUNT, Decimal::from_str("100000000000000000000").unwrap());
    }
}
