//! YAML Export functionality

use serde::Serialize;
use std::io::Write;

use crate::error::{XpenseError, XpenseResult};
use crate::export::json::ExportDocument;

/// Export a report to YAML
pub fn export_yaml<T: Serialize, W: Write>(report: &T, writer: &mut W) -> XpenseResult<()> {
    let document = ExportDocument::new(report);

    writeln!(writer, "# xpense report export")
        .and_then(|_| writeln!(writer, "# Generated: {}", document.generated_at))
        .map_err(|e| XpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &document).map_err(|e| XpenseError::Export(e.to_string()))?;
    Ok(())
}
