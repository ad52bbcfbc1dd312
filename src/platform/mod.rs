// SimZilla platform paths
// Selects the settings directory per target OS at compile time.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for SimZilla.
///
/// - **Linux**: `$XDG_CONFIG_HOME/simzilla`, else `~/.config/simzilla`
/// - **macOS**: `~/Library/Application Support/SimZilla`
/// - **Windows**: `%APPDATA%/SimZilla`
#[cfg(target_os = "windows")]
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("SimZilla")
}

#[cfg(target_os = "macos")]
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("SimZilla")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("simzilla"),
        _ => home_dir().join(".config").join("simzilla"),
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}
