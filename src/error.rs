//! Custom error types for xpense
//!
//! This module defines the error hierarchy for the engine using thiserror.
//! `ValidationError` covers a single malformed raw record; `XpenseError` is
//! the application-level error that wraps it alongside I/O, parsing and
//! configuration failures.

use thiserror::Error;

use crate::models::period::PeriodParseError;

/// A raw transaction record failed normalization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No amount was supplied
    #[error("amount is missing")]
    MissingAmount,

    /// The amount is not a decimal number
    #[error("amount is not a number: {0}")]
    InvalidAmount(String),

    /// The amount is below zero
    #[error("amount must not be negative: {0}")]
    NegativeAmount(String),

    /// No flow label was supplied
    #[error("flow type is missing")]
    MissingFlow,

    /// The flow label is not in the synonym table
    #[error("unknown flow type: {0}")]
    UnknownFlowType(String),

    /// No timestamp was supplied
    #[error("timestamp is missing")]
    MissingTimestamp,

    /// The timestamp could not be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// The main error type for xpense operations
#[derive(Error, Debug)]
pub enum XpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A single record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record at a known position in a batch failed validation
    #[error("Record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A period string could not be parsed
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// The configured reference timezone is not a known IANA zone
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

impl XpenseError {
    /// Attach a batch position to a validation error
    pub fn record(index: usize, source: ValidationError) -> Self {
        Self::Record { index, source }
    }

    /// Check if this is a validation error (with or without a record index)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Record { .. })
    }

    /// The underlying validation error, if any
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) | Self::Record { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for XpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for XpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_yaml::Error> for XpenseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<PeriodParseError> for XpenseError {
    fn from(err: PeriodParseError) -> Self {
        Self::InvalidPeriod(err.to_string())
    }
}

/// Result type alias for xpense operations
pub type XpenseResult<T> = Result<T, XpenseError>;
