//! Host configuration and logging setup.
//!
//! Everything is read from the environment:
//!
//! - `QUICKDEFINE_DATA_DIR`: directory holding `quickdefine.db` (defaults to the
//!   platform data directory)
//! - `QUICKDEFINE_LOG`: tracing filter directives, falling back to `RUST_LOG`, then `info`
//! - `QUICKDEFINE_LOG_FORMAT`: `json` for JSON log lines, anything else for plain text

use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::platform;

pub const DATA_DIR_ENV: &str = "QUICKDEFINE_DATA_DIR";
pub const LOG_ENV: &str = "QUICKDEFINE_LOG";
pub const LOG_FORMAT_ENV: &str = "QUICKDEFINE_LOG_FORMAT";

pub const DATABASE_FILE_NAME: &str = "quickdefine.db";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(platform::get_data_dir);
        let log_filter = non_empty(LOG_ENV)
            .or_else(|| non_empty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_format = match non_empty(LOG_FORMAT_ENV) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            data_dir,
            log_filter,
            log_format,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }
}

/// Installs the global tracing subscriber. Logs go to stderr; stdout carries
/// the host protocol.
pub fn init_tracing(config: &HostConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}
