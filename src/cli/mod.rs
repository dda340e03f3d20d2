//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the reporting engine.

pub mod args;
pub mod check;
pub mod report;

pub use args::{BreakdownArgs, InputArgs, OutputArgs, OutputFormat};
pub use check::{handle_check_command, CheckArgs, CheckReport};
pub use report::{handle_overview_command, handle_report_command, OverviewArgs, ReportCommands};
