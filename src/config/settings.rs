//! User settings for xpense
//!
//! Persisted reporting preferences: reference timezone, breakdown options
//! and the currency symbol used in terminal output.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::paths::XpensePaths;
use crate::error::{XpenseError, XpenseResult};
use crate::reports::{AggregateOptions, ReportConfig};

/// User settings for xpense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// IANA zone used to decide period membership
    #[serde(default = "default_timezone")]
    pub reference_timezone: String,

    /// Add a "Transfers" entry to the category breakdown
    #[serde(default)]
    pub include_transfers_in_breakdown: bool,

    /// Count inflow categories in the category breakdown
    #[serde(default)]
    pub include_inflow_categories: bool,

    /// Currency symbol for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_currency() -> String {
    "৳".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reference_timezone: default_timezone(),
            include_transfers_in_breakdown: false,
            include_inflow_categories: false,
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &XpensePaths) -> XpenseResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| XpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| XpenseError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &XpensePaths) -> XpenseResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| XpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| XpenseError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Resolve the configured reference timezone
    pub fn timezone(&self) -> XpenseResult<Tz> {
        parse_timezone(&self.reference_timezone)
    }

    /// Build the report configuration these settings describe
    pub fn report_config(&self) -> XpenseResult<ReportConfig> {
        Ok(ReportConfig {
            timezone: self.timezone()?,
            aggregate: AggregateOptions {
                include_inflow_categories: self.include_inflow_categories,
                include_transfers_in_breakdown: self.include_transfers_in_breakdown,
            },
        })
    }
}

/// Parse an IANA timezone identifier
pub fn parse_timezone(name: &str) -> XpenseResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| XpenseError::UnknownTimezone(name.to_string()))
}
