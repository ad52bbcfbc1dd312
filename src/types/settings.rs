use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    pub homepage: String,
    /// Search URL prefix; the percent-encoded query is appended.
    pub search_url: String,
    /// Favicon service template; `{host}` is replaced with the page host.
    pub favicon_service: String,
    pub window: WindowSettings,
    pub log_level: String,
    /// Action name to key combination overrides, applied on top of the defaults.
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            homepage: "https://www.google.com".to_string(),
            search_url: "https://www.google.com/search?q=".to_string(),
            favicon_service: "https://www.google.com/s2/favicons?domain={host}&sz=32".to_string(),
            window: WindowSettings::default(),
            log_level: "info".to_string(),
            shortcuts: HashMap::new(),
        }
    }
}

/// Main window geometry and title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "SimZilla".to_string(),
            width: 1300,
            height: 800,
        }
    }
}
