// Quick Define platform paths for macOS
// Data: ~/Library/Application Support/QuickDefine

use std::env;
use std::path::PathBuf;

/// Returns the data directory for Quick Define on macOS.
/// `~/Library/Application Support/QuickDefine`
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("QuickDefine")
}
