use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xpense::cli::{
    handle_check_command, handle_overview_command, handle_report_command, CheckArgs,
    OverviewArgs, ReportCommands,
};
use xpense::config::{parse_timezone, Settings, XpensePaths};

#[derive(Parser)]
#[command(
    name = "xpense",
    version,
    about = "Income and expense reports from transaction files",
    long_about = "xpense reads income, expense and bank transfer records from JSON or CSV \
                  files and reports monthly and yearly totals, category breakdowns and \
                  period-over-period comparisons."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly and yearly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// All-time totals
    Overview(OverviewArgs),

    /// Validate an input file
    Check(CheckArgs),

    /// Write a config file with the given defaults
    Init {
        /// IANA timezone used to decide period membership
        #[arg(long)]
        tz: Option<String>,

        /// Currency symbol for terminal output
        #[arg(long)]
        currency: Option<String>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = XpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => handle_report_command(&settings, cmd)?,
        Some(Commands::Overview(args)) => handle_overview_command(&settings, args)?,
        Some(Commands::Check(args)) => {
            let report = handle_check_command(&settings, args)?;
            if !report.is_clean() {
                bail!("{} invalid record(s)", report.rejected.len());
            }
        }
        Some(Commands::Init { tz, currency }) => {
            let mut settings = settings;
            if let Some(tz) = tz {
                parse_timezone(&tz)?;
                settings.reference_timezone = tz.trim().to_string();
            }
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            settings.save(&paths)?;
            println!("Configuration written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("xpense Configuration");
            println!("====================");
            println!("Config file: {}", paths.settings_file().display());
            if !paths.is_initialized() {
                println!("             (not created yet, run 'xpense init')");
            }
            println!();
            println!("Settings:");
            println!("  Reference timezone:     {}", settings.reference_timezone);
            println!(
                "  Transfers in breakdown: {}",
                settings.include_transfers_in_breakdown
            );
            println!(
                "  Inflow categories:      {}",
                settings.include_inflow_categories
            );
            println!("  Currency symbol:        {}", settings.currency_symbol);
        }
        None => {
            println!("xpense - income and expense reports");
            println!();
            println!("Run 'xpense --help' for usage information.");
            println!("Run 'xpense report month --input <FILE>' for this month's report.");
        }
    }

    Ok(())
}
