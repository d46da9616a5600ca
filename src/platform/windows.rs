// MiniBrowser platform paths for Windows
// Config: %APPDATA%/MiniBrowser
// Data:   %APPDATA%/MiniBrowser

use std::env;
use std::path::PathBuf;

/// Returns the roaming application-data directory on Windows.
fn appdata_dir() -> PathBuf {
    PathBuf::from(env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp")))
}

/// Returns the configuration directory for MiniBrowser on Windows.
/// `%APPDATA%/MiniBrowser`
pub fn get_config_dir() -> PathBuf {
    appdata_dir().join("MiniBrowser")
}

/// Returns the data directory for MiniBrowser on Windows.
/// `%APPDATA%/MiniBrowser`
pub fn get_data_dir() -> PathBuf {
    appdata_dir().join("MiniBrowser")
}
