//! Period report
//!
//! Composes the period filter, aggregator and comparator into one report for
//! a month or a year: totals, comparison with the preceding period, net
//! savings, category breakdown and top category. Yearly reports also carry
//! the monthly trend.

use chrono_tz::Tz;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use super::aggregate::{aggregate, percent_of, AggregateOptions, Aggregation, CategoryTotal};
use super::comparison::{compare, Comparison};
use super::trend::{monthly_trend, MonthlySummary};
use crate::display::report::{format_comparison, format_percentage, render_table, separator};
use crate::error::{XpenseError, XpenseResult};
use crate::models::{Money, Period, Transaction};
use crate::services::period_filter::select_with_previous;

/// Inputs that shape a report besides the transactions and the period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Zone in which calendar months and years are evaluated
    pub timezone: Tz,
    /// Category breakdown switches
    pub aggregate: AggregateOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            aggregate: AggregateOptions::default(),
        }
    }
}

/// Report for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub previous_period: Period,
    /// IANA id of the reference timezone
    pub timezone: String,
    /// Aggregation of the requested period
    pub current: Aggregation,
    /// Aggregation of the preceding period
    pub previous: Aggregation,
    pub inflow_comparison: Comparison,
    pub outflow_comparison: Comparison,
    /// Inflow minus outflow of the requested period
    pub net_savings: Money,
    /// Largest category of the requested period, transfers excluded
    pub top_category: Option<CategoryTotal>,
    /// Per-month trend, yearly reports only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<MonthlySummary>>,
}

impl PeriodReport {
    /// Build the report for `period`
    ///
    /// The preceding period is selected with the same reference zone.
    pub fn build(transactions: &[Transaction], period: Period, config: &ReportConfig) -> Self {
        let tz = config.timezone;
        let selection = select_with_previous(transactions, &period, tz);

        let current = aggregate(selection.current.iter().copied(), config.aggregate);
        let previous = aggregate(selection.previous.iter().copied(), config.aggregate);

        let inflow_comparison = compare(current.total_inflow, previous.total_inflow);
        let outflow_comparison = compare(current.total_outflow, previous.total_outflow);
        let net_savings = current.net();
        let top_category = current.top_category().cloned();

        let monthly = match period {
            Period::Year { year } => Some(monthly_trend(selection.current.iter().copied(), year, tz)),
            Period::Month { .. } => None,
        };

        debug!(
            %period,
            timezone = tz.name(),
            current = current.transaction_count(),
            previous = previous.transaction_count(),
            "Built period report"
        );

        Self {
            period,
            previous_period: period.previous(),
            timezone: tz.name().to_string(),
            current,
            previous,
            inflow_comparison,
            outflow_comparison,
            net_savings,
            top_category,
            monthly,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let kind = if self.period.is_month() { "Monthly" } else { "Yearly" };
        let money = |m: Money| m.format_with_symbol(symbol);

        output.push_str(&format!(
            "{} Report: {} ({})\n",
            kind,
            self.period.label(),
            self.timezone
        ));
        output.push_str(&separator(80));
        output.push('\n');
        output.push_str(&format!("Earnings:     {:>14}\n", money(self.current.total_inflow)));
        output.push_str(&format!("Expense:      {:>14}\n", money(self.current.total_outflow)));
        output.push_str(&format!("Net Savings:  {:>14}\n", money(self.net_savings)));
        output.push_str(&format!("Transactions: {:>14}\n\n", self.current.transaction_count()));

        let previous_label = self.previous_period.label();
        output.push_str(&format!(
            "Expense vs {}:  {}\n",
            previous_label,
            format_comparison(&self.outflow_comparison, symbol)
        ));
        output.push_str(&format!(
            "Earnings vs {}: {}\n",
            previous_label,
            format_comparison(&self.inflow_comparison, symbol)
        ));

        match &self.top_category {
            Some(top) => output.push_str(&format!(
                "Top Spending Category: {} ({})\n",
                top.label,
                money(top.amount)
            )),
            None => output.push_str("Top Spending Category: none\n"),
        }

        let transfers = &self.current.transfers;
        if !transfers.total().is_zero() {
            output.push_str(&format!(
                "Bank Transfers: deposits {}, withdrawals {}, net {}\n",
                money(transfers.deposits),
                money(transfers.withdrawals),
                money(transfers.net())
            ));
        }

        output.push_str("\nExpense Breakdown by Category\n");
        if self.current.by_category.is_empty() {
            output.push_str("No expense data available for this period\n");
        } else {
            let rows = self
                .current
                .by_category
                .iter()
                .map(|c| {
                    vec![
                        c.label.clone(),
                        money(c.amount),
                        c.transaction_count.to_string(),
                        format_percentage(c.share_of(self.current.total_outflow)),
                    ]
                })
                .collect();
            output.push_str(&render_table(&["Category", "Amount", "Count", "Share"], rows));
            output.push('\n');
        }

        if !self.current.by_payment_method.is_empty() {
            output.push_str("\nExpense by Payment Method\n");
            let rows = self
                .current
                .by_payment_method
                .iter()
                .map(|m| {
                    vec![
                        m.method.clone(),
                        money(m.amount),
                        m.transaction_count.to_string(),
                        format_percentage(percent_of(m.amount, self.current.total_outflow)),
                    ]
                })
                .collect();
            output.push_str(&render_table(&["Method", "Amount", "Count", "Share"], rows));
            output.push('\n');
        }

        if let Some(monthly) = &self.monthly {
            output.push_str("\nMonthly Earnings vs Expenses\n");
            if monthly.iter().any(MonthlySummary::has_activity) {
                let rows = monthly
                    .iter()
                    .map(|m| {
                        vec![
                            m.label.clone(),
                            money(m.inflow),
                            money(m.outflow),
                            money(m.inflow - m.outflow),
                        ]
                    })
                    .collect();
                output.push_str(&render_table(&["Month", "Earnings", "Expenses", "Net"], rows));
                output.push('\n');
            } else {
                output.push_str("No activity recorded this year\n");
            }
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per figure: `section,label,value,count,percent`.
    pub fn export_csv<W: Write>(&self, writer: W) -> XpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["section", "label", "value", "count", "percent"])?;

        let summary = [
            ("earnings", self.current.total_inflow, self.current.inflow_count),
            ("expense", self.current.total_outflow, self.current.outflow_count),
            ("net_savings", self.net_savings, self.current.transaction_count()),
            ("bank_deposits", self.current.transfers.deposits, self.current.transfer_count),
            ("bank_withdrawals", self.current.transfers.withdrawals, self.current.transfer_count),
        ];
        for (label, value, count) in summary {
            csv.write_record([
                "summary".to_string(),
                label.to_string(),
                value.to_string(),
                count.to_string(),
                String::new(),
            ])?;
        }

        for (label, cmp) in [
            ("earnings", &self.inflow_comparison),
            ("expense", &self.outflow_comparison),
        ] {
            csv.write_record([
                "comparison".to_string(),
                label.to_string(),
                cmp.delta.to_string(),
                String::new(),
                cmp.delta_percent.to_string(),
            ])?;
        }

        for c in &self.current.by_category {
            csv.write_record([
                "category".to_string(),
                c.label.clone(),
                c.amount.to_string(),
                c.transaction_count.to_string(),
                c.share_of(self.current.total_outflow).to_string(),
            ])?;
        }

        for m in &self.current.by_payment_method {
            csv.write_record([
                "payment_method".to_string(),
                m.method.clone(),
                m.amount.to_string(),
                m.transaction_count.to_string(),
                percent_of(m.amount, self.current.total_outflow).to_string(),
            ])?;
        }

        for m in self.monthly.iter().flatten() {
            for (suffix, value) in [("earnings", m.inflow), ("expense", m.outflow)] {
                csv.write_record([
                    "month".to_string(),
                    format!("{}-{:02} {}", self.period.year_number(), m.month, suffix),
                    value.to_string(),
                    String::new(),
                    String::new(),
                ])?;
            }
        }

        csv.flush()
            .map_err(|e| XpenseError::Export(e.to_string()))?;
        Ok(())
    }
}
