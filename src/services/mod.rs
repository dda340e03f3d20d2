//! Service layer for xpense
//!
//! Turns raw records into validated transactions and selects the
//! transactions that belong to a reporting period.

pub mod normalize;
pub mod period_filter;

pub use normalize::{normalize, NormalizedBatch, Normalizer, RecordError};
pub use period_filter::{select_in_period, select_with_previous, PeriodSelection};
