//! CLI commands for reports
//!
//! Monthly and yearly period reports and the all-time overview.

use std::io::Write;
use std::path::Path;

use clap::{Args, Subcommand};
use serde::Serialize;

use super::args::{open_output, BreakdownArgs, InputArgs, OutputArgs, OutputFormat};
use crate::config::Settings;
use crate::error::{XpenseError, XpenseResult};
use crate::export::{export_json, export_yaml};
use crate::models::Period;
use crate::reports::{Overview, PeriodReport};
use crate::services::Normalizer;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Report on one calendar month
    Month {
        /// Month to report on (YYYY-MM, default: current month)
        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        breakdown: BreakdownArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Report on one calendar year, with a monthly trend
    Year {
        /// Year to report on (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        breakdown: BreakdownArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments of the overview command
#[derive(Args, Debug)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Handle report commands
pub fn handle_report_command(settings: &Settings, cmd: ReportCommands) -> XpenseResult<()> {
    match cmd {
        ReportCommands::Month {
            period,
            input,
            breakdown,
            output,
        } => {
            let config = input.report_config(settings, &breakdown)?;
            let period = match period {
                Some(text) => parse_month(&text)?,
                None => Period::current_month(config.timezone),
            };
            let transactions = input.load_transactions(&Normalizer::new(config.timezone))?;
            let report = PeriodReport::build(&transactions, period, &config);
            write_period_report(&report, settings, &output)
        }
        ReportCommands::Year {
            year,
            input,
            breakdown,
            output,
        } => {
            let config = input.report_config(settings, &breakdown)?;
            let period = year
                .map(Period::year)
                .unwrap_or_else(|| Period::current_year(config.timezone));
            let transactions = input.load_transactions(&Normalizer::new(config.timezone))?;
            let report = PeriodReport::build(&transactions, period, &config);
            write_period_report(&report, settings, &output)
        }
    }
}

/// Handle the overview command
pub fn handle_overview_command(settings: &Settings, args: OverviewArgs) -> XpenseResult<()> {
    let config = args.input.report_config(settings, &BreakdownArgs::default())?;
    let transactions = args.input.load_transactions(&Normalizer::new(config.timezone))?;
    let overview = Overview::from_transactions(&transactions);

    let mut writer = open_output(args.output.output.as_deref())?;
    match args.output.format {
        OutputFormat::Terminal => {
            write_text(&mut writer, &overview.format_terminal(&settings.currency_symbol))?
        }
        OutputFormat::Csv => overview.export_csv(&mut writer)?,
        format => write_document(&mut writer, &overview, format)?,
    }
    finish(writer, args.output.output.as_deref())
}

fn parse_month(text: &str) -> XpenseResult<Period> {
    let period = Period::parse(text)?;
    if !period.is_month() {
        return Err(XpenseError::InvalidPeriod(format!(
            "{} (expected YYYY-MM)",
            text
        )));
    }
    Ok(period)
}

fn write_period_report(
    report: &PeriodReport,
    settings: &Settings,
    output: &OutputArgs,
) -> XpenseResult<()> {
    let mut writer = open_output(output.output.as_deref())?;
    match output.format {
        OutputFormat::Terminal => {
            write_text(&mut writer, &report.format_terminal(&settings.currency_symbol))?
        }
        OutputFormat::Csv => report.export_csv(&mut writer)?,
        format => write_document(&mut writer, report, format)?,
    }
    finish(writer, output.output.as_deref())
}

pub(crate) fn write_document<T: Serialize>(
    writer: &mut Box<dyn Write>,
    value: &T,
    format: OutputFormat,
) -> XpenseResult<()> {
    match format {
        OutputFormat::Yaml => export_yaml(value, writer),
        _ => export_json(value, writer, true),
    }
}

pub(crate) fn write_text(writer: &mut Box<dyn Write>, text: &str) -> XpenseResult<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| XpenseError::Export(e.to_string()))
}

pub(crate) fn finish(mut writer: Box<dyn Write>, path: Option<&Path>) -> XpenseResult<()> {
    writer
        .flush()
        .map_err(|e| XpenseError::Export(e.to_string()))?;
    if let Some(path) = path {
        eprintln!("Report written to: {}", path.display());
    }
    Ok(())
}
