//! Runtime configuration from environment variables.
//!
//! | Variable                | Default        |
//! |-------------------------|----------------|
//! | `WAITLINE_DB_PATH`      | `waitline.db`  |
//! | `WAITLINE_URGENT_ORDER` | `lifo`         |
//! | `WAITLINE_LOG_MODE`     | `auto`         |
//! | `WAITLINE_LOG_FILE`     | `waitline.log` |

use std::path::PathBuf;

use crate::domain::UrgentOrder;

const DB_PATH_ENV: &str = "WAITLINE_DB_PATH";
const URGENT_ORDER_ENV: &str = "WAITLINE_URGENT_ORDER";
const LOG_MODE_ENV: &str = "WAITLINE_LOG_MODE";
const LOG_FILE_ENV: &str = "WAITLINE_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise.
    Auto,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub urgent_order: UrgentOrder,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Problems found while reading the environment. Logging is not set up
    /// yet at that point, so the caller reports these once it is.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("waitline.db"),
            urgent_order: UrgentOrder::default(),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("waitline.log"),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unknown urgent-order values fall back to the default and leave an
    /// entry in `warnings`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let urgent_order = match lookup(URGENT_ORDER_ENV) {
            Some(raw) => raw.parse::<UrgentOrder>().unwrap_or_else(|e: String| {
                warnings.push(format!(
                    "{URGENT_ORDER_ENV}: {e}; using {}",
                    defaults.urgent_order
                ));
                defaults.urgent_order
            }),
            None => defaults.urgent_order,
        };

        Self {
            db_path: lookup(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            urgent_order,
            log_mode: lookup(LOG_MODE_ENV).map_or(defaults.log_mode, |v| LogMode::parse(&v)),
            log_file: lookup(LOG_FILE_ENV).map_or(defaults.log_file, PathBuf::from),
            warnings,
        }
    }
}
