//! Period filter
//!
//! Selects the transactions that fall inside a reporting period. Membership
//! is decided by the calendar date in a single reference timezone; callers
//! comparing two periods must pass the same zone to both selections.

use chrono_tz::Tz;

use crate::models::{Period, Transaction};

/// Transactions whose timestamp falls in `period`, evaluated in `tz`
///
/// The input is left untouched; the result borrows from it and keeps input
/// order.
pub fn select_in_period<'a>(
    transactions: &'a [Transaction],
    period: &Period,
    tz: Tz,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| period.contains(txn.timestamp, tz))
        .collect()
}

/// Selections for a period and the one immediately before it
#[derive(Debug, Clone)]
pub struct PeriodSelection<'a> {
    pub current: Vec<&'a Transaction>,
    pub previous: Vec<&'a Transaction>,
}

/// Select `period` and `period.previous()` with the same reference zone
pub fn select_with_previous<'a>(
    transactions: &'a [Transaction],
    period: &Period,
    tz: Tz,
) -> PeriodSelection<'a> {
    PeriodSelection {
        current: select_in_period(transactions, period, tz),
        previous: select_in_period(transactions, &period.previous(), tz),
    }
}
