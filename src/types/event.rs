use serde::{Deserialize, Serialize};

/// Failure code a surface reports when a navigation is aborted because a
/// newer one replaced it.
pub const ERR_ABORTED: i32 = -3;

/// Navigation event reported asynchronously by a rendering surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    LoadStarted,
    LoadStopped,
    FinishedLoad,
    Navigated { url: String },
    NavigatedInPage { url: String },
    TitleUpdated { title: String },
    LoadFailed(LoadFailure),
    DomReady,
}

impl SurfaceEvent {
    /// True for events after which the surface's URL and title are settled
    /// enough to be read back.
    pub fn is_content_settled(&self) -> bool {
        matches!(
            self,
            SurfaceEvent::LoadStopped
                | SurfaceEvent::FinishedLoad
                | SurfaceEvent::Navigated { .. }
                | SurfaceEvent::NavigatedInPage { .. }
                | SurfaceEvent::DomReady
        )
    }

    /// URL carried by the event, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            SurfaceEvent::Navigated { url } | SurfaceEvent::NavigatedInPage { url } => Some(url),
            SurfaceEvent::LoadFailed(failure) => Some(&failure.url),
            _ => None,
        }
    }
}

/// Details of a failed load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadFailure {
    pub code: i32,
    pub description: String,
    pub url: String,
}

impl LoadFailure {
    pub fn new(code: i32, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            url: url.into(),
        }
    }

    /// A superseded navigation is not an error the user should see.
    pub fn is_benign(&self) -> bool {
        self.code == ERR_ABORTED
    }
}
