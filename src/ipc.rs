//! Message protocol between the host and its webviews.
//!
//! The chrome page (tab sidebar, address bar, buttons) and the content pages
//! post JSON messages tagged by `cmd` through `window.ipc.postMessage()`. The
//! host answers by evaluating [`render_script`] in the chrome page.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::managers::shortcut_manager::KeyChord;
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::surface::SurfaceFactory;
use crate::types::errors::IpcError;

/// Script run in the chrome page to put the caret in the address bar.
pub const FOCUS_ADDRESS_SCRIPT: &str = "window.__simzilla && window.__simzilla.focusAddress()";

/// A decoded message from the chrome or from a content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeCommand {
    /// The chrome page finished loading and wants the current state.
    Ready,
    Navigate {
        input: String,
    },
    Back,
    Forward,
    Reload,
    NewTab,
    /// Closes `id`, or the active tab when absent.
    CloseTab {
        #[serde(default)]
        id: Option<String>,
    },
    ActivateTab {
        id: String,
    },
    Key(KeyChord),
    /// A content page changed its address without a page load.
    Location {
        url: String,
    },
}

/// Decodes one IPC message body.
pub fn parse_message(body: &str) -> Result<ChromeCommand, IpcError> {
    serde_json::from_str(body).map_err(|e| IpcError::Malformed(e.to_string()))
}

/// Script that pushes the tab list and control state into the chrome page.
pub fn render_script<F: SurfaceFactory>(tabs: &TabManager<F>) -> String {
    let state = json!({
        "tabs": tabs.get_all_tabs(),
        "activeId": tabs.active_tab_id(),
        "controls": tabs.controls(),
    });
    format!("window.__simzilla && window.__simzilla.render({})", state)
}
