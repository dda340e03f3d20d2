//! Period-over-period comparison
//!
//! Compares one total of the current period against the same total of the
//! preceding period.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::aggregate::percentage;
use crate::models::Money;

/// Sign of a change; a zero delta counts as an increase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Arrow used in terminal output
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Increase => "↑",
            Self::Decrease => "↓",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
        }
    }
}

/// Change of one metric between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub current: Money,
    pub previous: Money,
    /// `current - previous`
    pub delta: Money,
    /// Percent change with one fraction digit; 0 when there is no baseline
    pub delta_percent: Decimal,
    pub direction: Direction,
    /// False when the previous period was zero; a 0% change then means
    /// "nothing to compare against", not "unchanged"
    pub has_baseline: bool,
}

/// Compare a current total against the previous period's total
pub fn compare(current: Money, previous: Money) -> Comparison {
    let delta = current - previous;
    let has_baseline = !previous.is_zero();

    let delta_percent = percentage(delta.amount(), previous.amount());

    let direction = if delta.is_negative() {
        Direction::Decrease
    } else {
        Direction::Increase
    };

    Comparison {
        current,
        previous,
        delta,
        delta_percent,
        direction,
        has_baseline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_zero_baseline() {
        let cmp = compare(Money::from_units(100), Money::zero());
        assert_eq!(cmp.delta, Money::from_units(100));
        assert_eq!(cmp.delta_percent, Decimal::ZERO);
        assert_eq!(cmp.delta_percent.to_string(), "0.0");
        assert_eq!(cmp.direction, Direction::Increase);
        assert!(!cmp.has_baseline);
    }

    #[test]
    fn test_increase() {
        let cmp = compare(Money::from_units(150), Money::from_units(100));
        assert_eq!(cmp.delta, Money::from_units(50));
        assert_eq!(cmp.delta_percent, Decimal::new(500, 1));
        assert_eq!(cmp.direction, Direction::Increase);
        assert!(cmp.has_baseline);
    }

    #[test]
    fn test_decrease() {
        let cmp = compare(Money::from_units(80), Money::from_units(120));
        assert_eq!(cmp.delta, Money::from_units(-40));
        assert_eq!(cmp.delta_percent, Decimal::new(-333, 1));
        assert_eq!(cmp.direction, Direction::Decrease);
    }

    #[test]
    fn test_zero_delta_is_increase() {
        let cmp = compare(Money::from_units(60), Money::from_units(60));
        assert!(cmp.delta.is_zero());
        assert_eq!(cmp.delta_percent, Decimal::ZERO);
        assert_eq!(cmp.direction, Direction::Increase);
    }

    #[test]
    fn test_both_zero() {
        let cmp = compare(Money::zero(), Money::zero());
        assert_eq!(cmp.direction, Direction::Increase);
        assert!(!cmp.has_baseline);
    }

    #[test]
    fn test_huge_change_saturates() {
        let cmp = compare(
            Money::from_decimal(Decimal::from_str("1000000000000000000000000000").unwrap()),
            Money::from_units(1),
        );
        assert!(cmp.has_baseline);
        assert_eq!(cmp.direction, Direction::Increase);
        assert_eq!(cmp.delta_percent, Decimal::MAX);

        let cmp = compare(Money::zero(), Money::from_decimal(Decimal::new(1, 28)));
        assert_eq!(cmp.delta_percent, Decimal::new(-1000, 1));
    }

    #[test]
    fn test_percent_rounds_half_away_from_zero() {
        // 1/16 = 6.25%
        let cmp = compare(Money::from_units(17), Money::from_units(16));
        assert_eq!(cmp.delta_percent, Decimal::new(63, 1));
        let cmp = compare(Money::from_units(15), Money::from_units(16));
        assert_eq!(cmp.delta_percent, Decimal::new(-63, 1));
    }
}
