//! JSON Export functionality
//!
//! Wraps a report in a document with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{XpenseError, XpenseResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report together with provenance metadata
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub report: T,
}

impl<T> ExportDocument<T> {
    pub fn new(report: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_json<T: Serialize, W: Write>(
    report: &T,
    writer: &mut W,
    pretty: bool,
) -> XpenseResult<()> {
    let document = ExportDocument::new(report);

    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &document)
    } else {
        serde_json::to_writer(&mut *writer, &document)
    };
    result.map_err(|e| XpenseError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| XpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flow, Money, Period, Transaction};
    use crate::reports::{PeriodReport, ReportConfig};
    use chrono::TimeZone;

    #[test]
    fn test_export_report_json() {
        let transactions = vec![Transaction::new(
            Flow::Outflow,
            Money::from_cents(1050),
            "Food",
            Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
        )];
        let report = PeriodReport::build(
            &transactions,
            Period::month(2024, 3).unwrap(),
            &ReportConfig::default(),
        );

        let mut buf = Vec::new();
        export_json(&report, &mut buf, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["report"]["current"]["total_outflow"], "10.50");
        assert_eq!(value["report"]["current"]["by_category"][0]["label"], "Food");
        assert_eq!(value["report"]["current"]["by_category"][0]["value"], "10.50");
    }

    #[test]
    fn test_compact_output_is_one_line() {
        let mut buf = Vec::new();
        export_json(&vec![1, 2, 3], &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"report\":[1,2,3]"));
    }
}
