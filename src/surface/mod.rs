//! Rendering-surface capability contract.
//!
//! A surface is the host-provided thing that actually loads and displays a
//! page. The shell never looks inside it: it asks it to load, reload or
//! traverse history, reads back its URL and title, and reacts to the
//! [`SurfaceEvent`]s it reports. Requests are fire-and-forget; outcomes
//! arrive later as events.

pub mod headless;
pub mod history;

use crate::types::errors::SurfaceError;
use crate::types::event::SurfaceEvent;

/// Operations every rendering surface must support.
pub trait RenderingSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError>;
    fn reload(&mut self) -> Result<(), SurfaceError>;
    fn go_back(&mut self) -> Result<(), SurfaceError>;
    fn go_forward(&mut self) -> Result<(), SurfaceError>;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    /// The surface's current address, as the engine sees it.
    fn url(&self) -> Result<String, SurfaceError>;
    /// The current document title; empty when the page has none.
    fn title(&self) -> Result<String, SurfaceError>;
    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;

    /// Called with every event reported for this surface before the shell
    /// reads state back, so implementations that learn their state from
    /// events can record it.
    fn observe(&mut self, _event: &SurfaceEvent) {}
}

/// Creates surfaces for new tabs.
pub trait SurfaceFactory {
    type Surface: RenderingSurface;

    /// Instantiates a hidden surface for `tab_id` that starts loading `url`.
    fn create(&mut self, tab_id: &str, url: &str) -> Result<Self::Surface, SurfaceError>;
}
