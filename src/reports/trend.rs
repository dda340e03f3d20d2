//! Monthly trend for a calendar year
//!
//! Breaks a year into its twelve months, each with inflow, outflow and the
//! outflow split by payment method.

use chrono::Datelike;
use chrono_tz::Tz;
use serde::Serialize;

use super::aggregate::{aggregate, AggregateOptions, MethodTotal};
use crate::models::period::MONTH_LABELS;
use crate::models::{Money, Transaction};

/// Totals for one month of a yearly trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// Month number, 1-12
    pub month: u32,
    /// Short label ("Jan")
    pub label: String,
    pub inflow: Money,
    pub outflow: Money,
    /// Outflow per payment method
    pub payment_methods: Vec<MethodTotal>,
}

impl MonthlySummary {
    /// Check if the month had inflow or outflow
    pub fn has_activity(&self) -> bool {
        !self.inflow.is_zero() || !self.outflow.is_zero()
    }

    /// Outflow paid with `method`, zero if none
    pub fn outflow_by(&self, method: &str) -> Money {
        self.payment_methods
            .iter()
            .find(|m| m.method == method)
            .map(|m| m.amount)
            .unwrap_or_default()
    }
}

/// Twelve monthly summaries for `year`, evaluated in `tz`
///
/// Months without activity are present with zero totals.
pub fn monthly_trend<'a, I>(transactions: I, year: i32, tz: Tz) -> Vec<MonthlySummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: Vec<Vec<&Transaction>> = vec![Vec::new(); 12];

    for txn in transactions {
        let local = txn.timestamp.with_timezone(&tz);
        if local.year() == year {
            months[local.month0() as usize].push(txn);
        }
    }

    months
        .into_iter()
        .zip(MONTH_LABELS)
        .enumerate()
        .map(|(index, (selected, label))| {
            let agg = aggregate(selected, AggregateOptions::default());
            MonthlySummary {
                month: index as u32 + 1,
                label: label.to_string(),
                inflow: agg.total_inflow,
                outflow: agg.total_outflow,
                payment_methods: agg.by_payment_method,
            }
        })
        .collect()
}
