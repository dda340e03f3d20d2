//! CSV input
//!
//! Header: `id,type,amount,category,details,payment_method,date`. Column
//! order is free, missing columns read as absent and the JSON field aliases
//! are accepted as header names.

use std::io::Read;

use serde::Deserialize;

use crate::error::XpenseResult;
use crate::models::{RawAmount, RawTransaction};

/// One CSV row; every cell is kept as text so amounts stay exact
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRecord {
    id: Option<String>,
    #[serde(rename = "type", alias = "flow")]
    flow: Option<String>,
    amount: Option<String>,
    category: Option<String>,
    #[serde(rename = "details", alias = "detail")]
    detail: Option<String>,
    #[serde(alias = "paymentMethod")]
    payment_method: Option<String>,
    #[serde(rename = "date", alias = "timestamp")]
    timestamp: Option<String>,
}

fn present(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

impl From<CsvRecord> for RawTransaction {
    fn from(record: CsvRecord) -> Self {
        Self {
            id: present(record.id),
            flow: present(record.flow),
            amount: present(record.amount).map(RawAmount::Text),
            category: present(record.category),
            detail: present(record.detail),
            payment_method: present(record.payment_method),
            timestamp: present(record.timestamp),
        }
    }
}

/// Read raw records from CSV with a header row
pub fn read_csv<R: Read>(reader: R) -> XpenseResult<Vec<RawTransaction>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRecord>() {
        records.push(row?.into());
    }
    Ok(records)
}
