//! Import module for xpense
//!
//! Reads raw transaction records from files:
//! - JSON: an array of records, or an object with a `transactions` array
//! - CSV: a header row naming the record fields
//!
//! Records come back unvalidated; the normalizer decides what is usable.

pub mod csv;
pub mod json;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{XpenseError, XpenseResult};
use crate::models::RawTransaction;

pub use self::csv::read_csv;
pub use self::json::read_json;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Pick the format from the file extension; anything but `.csv` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Read raw records in the given format
pub fn read_raw_transactions<R: Read>(
    reader: R,
    format: InputFormat,
) -> XpenseResult<Vec<RawTransaction>> {
    match format {
        InputFormat::Json => read_json(reader),
        InputFormat::Csv => read_csv(reader),
    }
}

/// Load raw records from a file, choosing the format by extension
pub fn load_raw_transactions(path: &Path) -> XpenseResult<Vec<RawTransaction>> {
    let file = File::open(path)
        .map_err(|e| XpenseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let format = InputFormat::from_path(path);

    let records = read_raw_transactions(BufReader::new(file), format)?;
    debug!(path = %path.display(), ?format, records = records.len(), "Loaded raw transactions");
    Ok(records)
}
