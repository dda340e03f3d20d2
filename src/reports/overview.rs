//! All-time overview
//!
//! Totals across the whole transaction set, independent of any period.

use serde::Serialize;
use std::io::Write;

use super::aggregate::{aggregate, AggregateOptions, TransferTotals};
use crate::error::{XpenseError, XpenseResult};
use crate::models::{Money, Transaction};

/// All-time totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_inflow: Money,
    pub total_outflow: Money,
    /// Inflow minus outflow
    pub balance: Money,
    pub transfers: TransferTotals,
    pub transaction_count: usize,
}

impl Overview {
    /// Compute the overview of a transaction set
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let agg = aggregate(transactions, AggregateOptions::default());
        Self {
            total_inflow: agg.total_inflow,
            total_outflow: agg.total_outflow,
            balance: agg.net(),
            transfers: agg.transfers,
            transaction_count: agg.transaction_count(),
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Total Balance:  {:>14}\n", money(self.balance)));
        output.push_str(&format!("Total Income:   {:>14}\n", money(self.total_inflow)));
        output.push_str(&format!("Total Expense:  {:>14}\n", money(self.total_outflow)));
        if !self.transfers.total().is_zero() {
            output.push_str(&format!("Bank Net:       {:>14}\n", money(self.transfers.net())));
        }
        output.push_str(&format!("Transactions:   {:>14}\n", self.transaction_count));
        output
    }

    /// Export the overview as `metric,value` rows
    pub fn export_csv<W: Write>(&self, writer: W) -> XpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["metric", "value"])?;

        let rows = [
            ("balance", self.balance.to_string()),
            ("total_inflow", self.total_inflow.to_string()),
            ("total_outflow", self.total_outflow.to_string()),
            ("bank_deposits", self.transfers.deposits.to_string()),
            ("bank_withdrawals", self.transfers.withdrawals.to_string()),
            ("transaction_count", self.transaction_count.to_string()),
        ];
        for (metric, value) in rows {
            csv.write_record([metric, value.as_str()])?;
        }

        csv.flush()
            .map_err(|e| XpenseError::Export(format!("Failed to write CSV: {}", e)))
    }
}
