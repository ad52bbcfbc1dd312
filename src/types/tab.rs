use serde::{Deserialize, Serialize};

/// Title shown before a surface reports anything.
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Title shown while a surface is loading.
pub const LOADING_TITLE: &str = "Loading...";

/// Represents a browser tab with its last observed navigation state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
    pub loading: bool,
    /// Description of the last real load failure, cleared when a new load starts.
    pub load_error: Option<String>,
}

impl Tab {
    pub fn new(id: String, url: String, favicon: Option<String>) -> Self {
        Self {
            id,
            url,
            title: NEW_TAB_TITLE.to_string(),
            favicon,
            loading: false,
            load_error: None,
        }
    }

    /// Title placeholder for a failed load.
    pub fn error_title(description: &str) -> String {
        format!("Error: {}", description)
    }
}

/// State of the shared address bar and navigation buttons.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavControls {
    pub address: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}
