//! CSV Export functionality
//!
//! Writes normalized transactions in the layout the importer reads, so a
//! cleaned file can be fed back in.

use std::io::Write;

use crate::error::{XpenseError, XpenseResult};
use crate::models::Transaction;

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> XpenseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "id",
        "type",
        "amount",
        "category",
        "details",
        "payment_method",
        "date",
    ])?;

    for txn in transactions {
        let amount = txn.amount.amount().to_string();
        let date = txn.timestamp.to_rfc3339();
        csv.write_record([
            txn.id.as_str(),
            txn.flow.label(),
            amount.as_str(),
            txn.category.original.as_str(),
            txn.detail.as_deref().unwrap_or(""),
            txn.payment_method.as_deref().unwrap_or(""),
            date.as_str(),
        ])?;
    }

    csv.flush()
        .map_err(|e| XpenseError::Export(format!("Failed to write CSV: {}", e)))?;
    Ok(())
}
