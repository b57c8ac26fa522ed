// Quick Define platform paths for Linux
// Data: ~/.local/share/quickdefine

use std::env;
use std::path::PathBuf;

/// Returns the data directory for Quick Define on Linux.
/// Uses `$XDG_DATA_HOME/quickdefine` if set, otherwise `~/.local/share/quickdefine`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("quickdefine")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("quickdefine")
    }
}
