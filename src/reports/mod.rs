//! Reports module for xpense
//!
//! The aggregation and reporting engine: aggregation, period-over-period
//! comparison, period reports with rankings, monthly trends and the
//! all-time overview. Everything here is a pure function of its inputs.

pub mod aggregate;
pub mod comparison;
pub mod overview;
pub mod period_report;
pub mod trend;

pub use aggregate::{
    aggregate, AggregateOptions, Aggregation, BreakdownBucket, CategoryTotal, MethodTotal, Tally,
    TransferTotals,
};
pub use comparison::{compare, Comparison, Direction};
pub use overview::Overview;
pub use period_report::{PeriodReport, ReportConfig};
pub use trend::{monthly_trend, MonthlySummary};
