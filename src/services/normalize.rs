//! Transaction normalizer
//!
//! Turns raw records into canonical `Transaction` values. Normalization is a
//! pure function of the record and the reference timezone: it never coerces
//! bad data into defaults, it reports the first problem it finds.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::error::{ValidationError, XpenseError, XpenseResult};
use crate::models::money::MAX_AMOUNT;
use crate::models::{
    CategoryName, Flow, Money, RawAmount, RawTransaction, Transaction, TransactionId,
};

/// Timestamp formats that carry their own UTC offset (besides RFC 3339)
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Timestamp formats without an offset; read as local time in the reference zone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalize a raw record, reading offset-less timestamps as UTC
pub fn normalize(raw: &RawTransaction) -> Result<Transaction, ValidationError> {
    Normalizer::new(Tz::UTC).normalize(raw)
}

/// A record rejected by [`Normalizer::normalize_lenient`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordError {
    /// Position of the record in the input batch
    pub index: usize,
    /// Id carried by the record, if any
    pub id: Option<String>,
    /// Why the record was rejected
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

fn serialize_display<S: serde::Serializer>(
    err: &ValidationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

/// Result of a lenient batch normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Records that passed validation, in input order
    pub transactions: Vec<Transaction>,
    /// Records that failed validation
    pub rejected: Vec<RecordError>,
}

/// Normalizer bound to a reference timezone
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    tz: Tz,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Normalizer {
    /// Create a normalizer for the given reference timezone
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// The reference timezone used for offset-less timestamps
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Validate and canonicalize a single record
    pub fn normalize(&self, raw: &RawTransaction) -> Result<Transaction, ValidationError> {
        let flow = Flow::from_label(raw.flow.as_deref().ok_or(ValidationError::MissingFlow)?)?;
        let amount = parse_amount(raw.amount.as_ref())?;
        let timestamp = self.parse_timestamp(raw.timestamp.as_deref())?;

        let id = non_blank(raw.id.as_deref())
            .map(TransactionId::new)
            .unwrap_or_else(TransactionId::generate);

        Ok(Transaction {
            id,
            flow,
            amount,
            category: CategoryName::new(raw.category.as_deref()),
            detail: non_blank(raw.detail.as_deref()).map(str::to_string),
            payment_method: non_blank(raw.payment_method.as_deref()).map(str::to_lowercase),
            timestamp,
        })
    }

    /// Normalize a batch, failing on the first invalid record
    pub fn normalize_all(&self, raws: &[RawTransaction]) -> XpenseResult<Vec<Transaction>> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| {
                self.normalize(raw)
                    .map_err(|err| XpenseError::record(index, err))
            })
            .collect()
    }

    /// Normalize a batch, skipping invalid records and reporting them
    pub fn normalize_lenient(&self, raws: &[RawTransaction]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for (index, raw) in raws.iter().enumerate() {
            match self.normalize(raw) {
                Ok(txn) => batch.transactions.push(txn),
                Err(error) => {
                    warn!(index, id = ?raw.id, %error, "Skipping invalid transaction record");
                    batch.rejected.push(RecordError {
                        index,
                        id: raw.id.clone(),
                        error,
                    });
                }
            }
        }

        batch
    }

    fn parse_timestamp(&self, raw: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
        let s = non_blank(raw).ok_or(ValidationError::MissingTimestamp)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Ok(dt.with_timezone(&Utc));
            }
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| ValidationError::InvalidTimestamp(s.to_string()))?;

        self.localize(naive)
            .ok_or_else(|| ValidationError::InvalidTimestamp(s.to_string()))
    }

    /// Resolve a local wall-clock time in the reference zone
    ///
    /// Ambiguous times take the earlier instant; times inside a DST gap are
    /// moved forward by the usual one-hour shift.
    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
    }
}

fn parse_amount(raw: Option<&RawAmount>) -> Result<Money, ValidationError> {
    let text = match raw {
        None => return Err(ValidationError::MissingAmount),
        Some(RawAmount::Text(s)) if s.trim().is_empty() => {
            return Err(ValidationError::MissingAmount)
        }
        Some(RawAmount::Text(s)) => s.trim().to_string(),
        Some(RawAmount::Number(n)) => n.to_string(),
    };

    let amount =
        Money::parse(&text).map_err(|_| ValidationError::InvalidAmount(text.clone()))?;
    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount(text));
    }
    if amount.amount() > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount(text));
    }
    Ok(amount)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
