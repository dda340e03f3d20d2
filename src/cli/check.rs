//! CLI command for validating an input file
//!
//! Normalizes every record and lists the ones that would be rejected.
//! With `--format csv` the valid records are written out in normalized form.

use clap::Args;
use serde::Serialize;

use super::args::{open_output, BreakdownArgs, InputArgs, OutputArgs, OutputFormat};
use super::report::{finish, write_document, write_text};
use crate::config::Settings;
use crate::error::XpenseResult;
use crate::export::export_transactions_csv;
use crate::import::load_raw_transactions;
use crate::services::{NormalizedBatch, Normalizer, RecordError};

/// Arguments of the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Outcome of validating an input file
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub records: usize,
    pub valid: usize,
    pub rejected: Vec<RecordError>,
}

impl CheckReport {
    pub fn from_batch(records: usize, batch: &NormalizedBatch) -> Self {
        Self {
            records,
            valid: batch.transactions.len(),
            rejected: batch.rejected.clone(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!(
            "{} records: {} valid, {} invalid\n",
            self.records,
            self.valid,
            self.rejected.len()
        );
        for rejected in &self.rejected {
            match &rejected.id {
                Some(id) => output.push_str(&format!(
                    "  Record {} ({}): {}\n",
                    rejected.index, id, rejected.error
                )),
                None => output.push_str(&format!(
                    "  Record {}: {}\n",
                    rejected.index, rejected.error
                )),
            }
        }
        output
    }
}

/// Handle the check command; returns the report so the caller can pick
/// the exit status
pub fn handle_check_command(settings: &Settings, args: CheckArgs) -> XpenseResult<CheckReport> {
    let config = args.input.report_config(settings, &BreakdownArgs::default())?;
    let raws = load_raw_transactions(&args.input.input)?;
    let batch = Normalizer::new(config.timezone).normalize_lenient(&raws);
    let report = CheckReport::from_batch(raws.len(), &batch);

    let mut writer = open_output(args.output.output.as_deref())?;
    match args.output.format {
        OutputFormat::Terminal => write_text(&mut writer, &report.format_terminal())?,
        OutputFormat::Csv => export_transactions_csv(&batch.transactions, &mut writer)?,
        format => write_document(&mut writer, &report, format)?,
    }
    finish(writer, args.output.output.as_deref())?;

    Ok(report)
}
