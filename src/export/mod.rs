//! Export module for xpense
//!
//! Writes reports and normalized transactions out in machine-readable form:
//! - JSON: reports wrapped in a versioned document
//! - YAML: the same document, human-readable
//! - CSV: normalized transactions in the import layout

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_json, ExportDocument, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
