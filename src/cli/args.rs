//! Arguments shared by the reporting commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::{parse_timezone, Settings};
use crate::error::{XpenseError, XpenseResult};
use crate::import::load_raw_transactions;
use crate::models::Transaction;
use crate::reports::ReportConfig;
use crate::services::{NormalizedBatch, Normalizer};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Terminal,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV rows
    Csv,
}

/// Where transactions come from and how they are read
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Transactions file (.json or .csv)
    #[arg(short, long, env = "XPENSE_INPUT")]
    pub input: PathBuf,

    /// IANA timezone for periods and naive timestamps (overrides config)
    #[arg(long)]
    pub tz: Option<String>,

    /// Skip invalid records instead of failing
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Category breakdown switches
#[derive(Args, Debug, Clone, Default)]
pub struct BreakdownArgs {
    /// Add bank transfers to the category breakdown
    #[arg(long)]
    pub include_transfers: bool,

    /// Count inflow categories in the category breakdown
    #[arg(long)]
    pub include_inflow_categories: bool,
}

/// Where and how results are written
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve the reference timezone: flag first, then settings
    pub fn report_config(
        &self,
        settings: &Settings,
        breakdown: &BreakdownArgs,
    ) -> XpenseResult<ReportConfig> {
        let mut config = settings.report_config()?;
        if let Some(tz) = &self.tz {
            config.timezone = parse_timezone(tz)?;
        }
        config.aggregate.include_transfers_in_breakdown |= breakdown.include_transfers;
        config.aggregate.include_inflow_categories |= breakdown.include_inflow_categories;
        Ok(config)
    }

    /// Load and normalize every record, failing on the first invalid one
    /// unless `--skip-invalid` is set
    pub fn load_transactions(&self, normalizer: &Normalizer) -> XpenseResult<Vec<Transaction>> {
        let raws = load_raw_transactions(&self.input)?;

        let transactions = if self.skip_invalid {
            let NormalizedBatch {
                transactions,
                rejected,
            } = normalizer.normalize_lenient(&raws);
            if !rejected.is_empty() {
                info!(skipped = rejected.len(), "Skipped invalid records");
            }
            transactions
        } else {
            normalizer.normalize_all(&raws)?
        };

        Ok(transactions)
    }
}

/// Open the output destination
pub fn open_output(path: Option<&Path>) -> XpenseResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                XpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        breakdown: BreakdownArgs,
        #[command(flatten)]
        output: OutputArgs,
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = TestCli::parse_from([
            "xpense",
            "--input",
            "data.json",
            "--tz",
            "Asia/Dhaka",
            "--include-transfers",
            "--format",
            "yaml",
        ]);
        let config = cli.input.report_config(&Settings::default(), &cli.breakdown).unwrap();

        assert_eq!(config.timezone, chrono_tz::Asia::Dhaka);
        assert!(config.aggregate.include_transfers_in_breakdown);
        assert!(!config.aggregate.include_inflow_categories);
        assert_eq!(cli.output.format, OutputFormat::Yaml);
        assert!(cli.output.output.is_none());
    }

    #[test]
    fn test_settings_apply_without_flags() {
        let cli = TestCli::parse_from(["xpense", "--input", "data.csv"]);
        let settings = Settings {
            reference_timezone: "Europe/London".into(),
            include_inflow_categories: true,
            ..Settings::default()
        };
        let config = cli.input.report_config(&settings, &cli.breakdown).unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert!(config.aggregate.include_inflow_categories);
        assert_eq!(cli.output.format, OutputFormat::Terminal);
    }

    #[test]
    fn test_unknown_tz_flag() {
        let cli = TestCli::parse_from(["xpense", "--input", "x.json", "--tz", "Nowhere/Land"]);
        let err = cli.input.report_config(&Settings::default(), &cli.breakdown).unwrap_err();
        assert!(matches!(err, XpenseError::UnknownTimezone(_)));
    }
}
