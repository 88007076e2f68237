//! Path resolution for stockroom data files.
//!
//! Provides XDG-compliant path resolution.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "stockroom";
const DB_FILE: &str = "inventory.db";

/// Get XDG-compliant data directory for stockroom.
///
/// Uses `$XDG_DATA_HOME/stockroom`, then `$HOME/.local/share/stockroom`,
/// and finally `./stockroom` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/inventory.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join(DB_FILE)
}
