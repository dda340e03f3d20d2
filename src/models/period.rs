//! Reporting period representation
//!
//! A period is either a calendar month or a full calendar year. Membership
//! is always evaluated in a reference timezone, so an instant near midnight
//! can land in different months depending on the zone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Short month labels, January first
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Represents a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Period {
    /// Calendar month (e.g., "2024-03")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2024")
    Year { year: i32 },
}

/// Unchecked wire form of [`Period`]; deserialization goes through
/// [`Period::month`] so out-of-range months are rejected
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PeriodRepr {
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

impl TryFrom<PeriodRepr> for Period {
    type Error = PeriodParseError;

    fn try_from(repr: PeriodRepr) -> Result<Self, Self::Error> {
        match repr {
            PeriodRepr::Month { year, month } => Period::month(year, month),
            PeriodRepr::Year { year } => Ok(Period::year(year)),
        }
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = PeriodRepr::deserialize(deserializer)?;
        Period::try_from(repr).map_err(de::Error::custom)
    }
}

impl Period {
    /// Create a monthly period
    ///
    /// Returns an error if `month` is not in `1..=12`.
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self::Month { year, month })
    }

    /// Create a yearly period
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// The month containing `instant` in the given zone
    pub fn month_of(instant: DateTime<Utc>, tz: Tz) -> Self {
        let local = instant.with_timezone(&tz);
        Self::Month {
            year: local.year(),
            month: local.month(),
        }
    }

    /// The year containing `instant` in the given zone
    pub fn year_of(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self::Year {
            year: instant.with_timezone(&tz).year(),
        }
    }

    /// The current month in the given zone
    pub fn current_month(tz: Tz) -> Self {
        Self::month_of(Utc::now(), tz)
    }

    /// The current year in the given zone
    pub fn current_year(tz: Tz) -> Self {
        Self::year_of(Utc::now(), tz)
    }

    /// Calendar year of this period
    pub fn year_number(&self) -> i32 {
        match self {
            Self::Month { year, .. } | Self::Year { year } => *year,
        }
    }

    /// Check if this is a monthly period
    pub fn is_month(&self) -> bool {
        matches!(self, Self::Month { .. })
    }

    /// Check if an instant falls within this period, evaluated in `tz`
    pub fn contains(&self, instant: DateTime<Utc>, tz: Tz) -> bool {
        let local = instant.with_timezone(&tz);
        match self {
            Self::Month { year, month } => local.year() == *year && local.month() == *month,
            Self::Year { year } => local.year() == *year,
        }
    }

    /// First calendar day of the period
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }

    /// Last calendar day of the period (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.next().start_date()?.pred_opt()
    }

    /// The immediately preceding period of the same kind
    ///
    /// January rolls back to December of the previous year.
    pub fn previous(&self) -> Self {
        match self {
            Self::Month { year, month: 1 } => Self::Month {
                year: year - 1,
                month: 12,
            },
            Self::Month { year, month } => Self::Month {
                year: *year,
                month: month - 1,
            },
            Self::Year { year } => Self::Year { year: year - 1 },
        }
    }

    /// The immediately following period of the same kind
    pub fn next(&self) -> Self {
        match self {
            Self::Month { year, month: 12 } => Self::Month {
                year: year + 1,
                month: 1,
            },
            Self::Month { year, month } => Self::Month {
                year: *year,
                month: month + 1,
            },
            Self::Year { year } => Self::Year { year: year + 1 },
        }
    }

    /// Human-readable label ("Mar 2024", "2024")
    pub fn label(&self) -> String {
        match self {
            Self::Month { year, month } => {
                let name = month
                    .checked_sub(1)
                    .and_then(|m| MONTH_LABELS.get(m as usize))
                    .copied()
                    .unwrap_or("???");
                format!("{} {}", name, year)
            }
            Self::Year { year } => year.to_string(),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2024-03"
    /// - Yearly: "2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        match s.split_once('-') {
            Some((year, month)) => {
                let year = parse_year(year, s)?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                Self::month(year, month)
            }
            None => Ok(Self::Year {
                year: parse_year(s, s)?,
            }),
        }
    }
}

fn parse_year(part: &str, whole: &str) -> Result<i32, PeriodParseError> {
    if part.len() != 4 || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(PeriodParseError::InvalidFormat(whole.to_string()));
    }
    part.parse()
        .map_err(|_| PeriodParseError::InvalidFormat(whole.to_string()))
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("Invalid period format: {0} (expected YYYY-MM or YYYY)")]
    InvalidFormat(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
}
