//! xpense - income and expense aggregation and reporting
//!
//! This library turns raw transaction records (income, expense and bank
//! transfer entries) into monthly and yearly reports: totals, category and
//! payment-method breakdowns, comparison with the previous period and the
//! top spending category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, flows, periods, transactions)
//! - `services`: Record normalization and period selection
//! - `reports`: Aggregation, comparison and report composition
//! - `import`: JSON and CSV input
//! - `export`: JSON, YAML and CSV output
//! - `display`: Terminal formatting
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `xpense` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use xpense::models::Period;
//! use xpense::reports::{PeriodReport, ReportConfig};
//! use xpense::services::Normalizer;
//!
//! let raws = xpense::import::load_raw_transactions(path)?;
//! let transactions = Normalizer::default().normalize_all(&raws)?;
//! let report = PeriodReport::build(&transactions, Period::month(2024, 3)?, &ReportConfig::default());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{ValidationError, XpenseError, XpenseResult};
