//! Configuration module for xpense
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - Persisted reporting settings

pub mod paths;
pub mod settings;

pub use paths::XpensePaths;
pub use settings::{parse_timezone, Settings};
