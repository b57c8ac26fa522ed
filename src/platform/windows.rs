// Quick Define platform paths for Windows
// Data: %APPDATA%/QuickDefine

use std::env;
use std::path::PathBuf;

/// Returns the data directory for Quick Define on Windows.
/// `%APPDATA%/QuickDefine`
pub fn get_data_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("QuickDefine")
}
