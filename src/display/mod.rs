//! Display formatting for terminal output
//!
//! Provides the table and comparison formatting used by the reports.

pub mod report;

pub use report::{format_comparison, format_percentage, render_table, separator};
