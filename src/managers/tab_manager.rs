//! Tab Manager for SimZilla.
//!
//! Owns the ordered tab list, the active tab, and the shared navigation
//! controls. Each tab's address, title and favicon are only ever taken from
//! what its rendering surface reports; requested navigations are never
//! assumed to have happened.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::services::address::AddressResolver;
use crate::surface::{RenderingSurface, SurfaceFactory};
use crate::types::errors::{SurfaceError, TabError};
use crate::types::event::SurfaceEvent;
use crate::types::tab::{NavControls, Tab, LOADING_TITLE, NEW_TAB_TITLE};

/// Address prefix engines use for their internal error pages.
const ERROR_PAGE_PREFIX: &str = "chrome-error://";

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self, address: &str) -> Result<String, TabError>;
    fn activate_tab(&mut self, tab_id: &str) -> bool;
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn navigate(&mut self, raw_input: &str);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn on_surface_event(&mut self, tab_id: &str, event: SurfaceEvent);
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn get_all_tabs(&self) -> Vec<&Tab>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn tab_count(&self) -> usize;
    fn controls(&self) -> &NavControls;
}

struct TabEntry<S> {
    tab: Tab,
    surface: S,
}

/// Tab manager over any kind of rendering surface.
pub struct TabManager<F: SurfaceFactory> {
    factory: F,
    resolver: AddressResolver,
    tabs: Vec<TabEntry<F::Surface>>,
    active_tab_id: Option<String>,
    controls: NavControls,
}

impl<F: SurfaceFactory> TabManager<F> {
    pub fn new(factory: F, resolver: AddressResolver) -> Self {
        Self {
            factory,
            resolver,
            tabs: Vec::new(),
            active_tab_id: None,
            controls: NavControls::default(),
        }
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub fn homepage(&self) -> &str {
        self.resolver.homepage()
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    /// Borrow a tab's rendering surface.
    pub fn surface(&self, tab_id: &str) -> Option<&F::Surface> {
        self.find_tab_index(tab_id).map(|i| &self.tabs[i].surface)
    }

    /// Applies `f` to every surface, in display order.
    pub fn for_each_surface(&mut self, mut f: impl FnMut(&mut F::Surface)) {
        for entry in &mut self.tabs {
            f(&mut entry.surface);
        }
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|e| e.tab.id == tab_id)
    }

    fn active_index(&self) -> Option<usize> {
        self.active_tab_id
            .as_deref()
            .and_then(|id| self.find_tab_index(id))
    }

    fn is_active(&self, tab_id: &str) -> bool {
        self.active_tab_id.as_deref() == Some(tab_id)
    }

    /// Shows the active tab's surface and hides every other one.
    fn apply_visibility(&mut self) {
        let active = self.active_tab_id.clone();
        for entry in &mut self.tabs {
            let visible = active.as_deref() == Some(entry.tab.id.as_str());
            if let Err(e) = entry.surface.set_visible(visible) {
                warn!("failed to set visibility of tab {}: {}", entry.tab.id, e);
            }
        }
    }

    /// Refreshes the address bar and back/forward enablement from the active tab.
    fn refresh_controls(&mut self) {
        self.controls = match self.active_index() {
            Some(i) => {
                let entry = &self.tabs[i];
                NavControls {
                    address: entry.tab.url.clone(),
                    can_go_back: entry.surface.can_go_back(),
                    can_go_forward: entry.surface.can_go_forward(),
                }
            }
            None => NavControls::default(),
        };
    }

    /// Re-reads URL and title from the surface after content settled.
    fn sync_from_surface(&mut self, index: usize) {
        let entry = &mut self.tabs[index];
        let url = match entry.surface.url() {
            Ok(url) => url,
            Err(e) => {
                warn!("failed to read url of tab {}: {}", entry.tab.id, e);
                return;
            }
        };
        if url.is_empty() || url.starts_with(ERROR_PAGE_PREFIX) {
            return;
        }

        let title = entry.surface.title().unwrap_or_else(|e| {
            warn!("failed to read title of tab {}: {}", entry.tab.id, e);
            String::new()
        });

        entry.tab.favicon = self.resolver.favicon_for(&url);
        entry.tab.url = url;
        if entry.tab.load_error.is_none() {
            entry.tab.title = display_title(&title, &entry.tab.url);
        }

        let tab_id = entry.tab.id.clone();
        if self.is_active(&tab_id) {
            self.refresh_controls();
        }
    }

    /// Runs a request against the active surface, logging instead of
    /// propagating failures.
    fn with_active_surface(
        &mut self,
        op: &str,
        request: impl FnOnce(&mut F::Surface) -> Result<(), SurfaceError>,
    ) {
        let Some(index) = self.active_index() else {
            debug!("{} ignored: no active tab", op);
            return;
        };
        let entry = &mut self.tabs[index];
        if let Err(e) = request(&mut entry.surface) {
            warn!("{} failed on tab {}: {}", op, entry.tab.id, e);
        }
    }
}

/// Reported title, else the address, else the placeholder.
fn display_title(title: &str, url: &str) -> String {
    if !title.is_empty() {
        title.to_string()
    } else if !url.is_empty() {
        url.to_string()
    } else {
        NEW_TAB_TITLE.to_string()
    }
}

impl<F: SurfaceFactory> TabManagerTrait for TabManager<F> {
    /// Opens a new tab at `address` (normalized) and makes it active.
    fn create_tab(&mut self, address: &str) -> Result<String, TabError> {
        let id = Uuid::new_v4().to_string();
        let url = self.resolver.to_url(address);
        let surface = self.factory.create(&id, &url)?;

        // Seed from the surface's own report; fall back to the request only
        // when the engine has nothing to say yet.
        let seeded = surface
            .url()
            .ok()
            .filter(|u| !u.is_empty() && !u.starts_with(ERROR_PAGE_PREFIX))
            .unwrap_or(url);
        let favicon = self.resolver.favicon_for(&seeded);

        info!("opened tab {} at {}", id, seeded);
        self.tabs.push(TabEntry {
            tab: Tab::new(id.clone(), seeded, favicon),
            surface,
        });
        self.activate_tab(&id);
        Ok(id)
    }

    /// Makes `tab_id` the visible tab. Returns false if it was already
    /// active or does not exist.
    fn activate_tab(&mut self, tab_id: &str) -> bool {
        if self.is_active(tab_id) || self.find_tab_index(tab_id).is_none() {
            return false;
        }
        debug!("activating tab {}", tab_id);
        self.active_tab_id = Some(tab_id.to_string());
        self.apply_visibility();
        self.refresh_controls();
        true
    }

    /// Closes a tab and drops its surface.
    ///
    /// An active tab hands over to the tab now at its position (or the new
    /// last tab). Closing the last tab opens a fresh one at the homepage;
    /// if that fails, the last tab stays open and the error is returned.
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        let index = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        if self.tabs.len() == 1 {
            // The replacement must exist before the sole tab goes away.
            let homepage = self.resolver.homepage().to_string();
            self.create_tab(&homepage)?;
            drop(self.tabs.remove(index));
            info!("closed tab {}", tab_id);
            return Ok(());
        }

        let was_active = self.is_active(tab_id);
        drop(self.tabs.remove(index));
        info!("closed tab {}", tab_id);

        if was_active {
            let next = index.min(self.tabs.len() - 1);
            let next_id = self.tabs[next].tab.id.clone();
            self.activate_tab(&next_id);
        }
        Ok(())
    }

    /// Asks the active surface to load the interpretation of `raw_input`.
    fn navigate(&mut self, raw_input: &str) {
        let url = self.resolver.to_url(raw_input);
        debug!("navigate {:?} -> {}", raw_input, url);
        self.with_active_surface("navigate", |s| s.load_url(&url));
    }

    fn go_back(&mut self) {
        self.with_active_surface("back", |s| {
            if s.can_go_back() {
                s.go_back()
            } else {
                Ok(())
            }
        });
    }

    fn go_forward(&mut self) {
        self.with_active_surface("forward", |s| {
            if s.can_go_forward() {
                s.go_forward()
            } else {
                Ok(())
            }
        });
    }

    fn reload(&mut self) {
        self.with_active_surface("reload", |s| s.reload());
    }

    /// Reconciles a tab with an event its surface reported.
    fn on_surface_event(&mut self, tab_id: &str, event: SurfaceEvent) {
        let Some(index) = self.find_tab_index(tab_id) else {
            debug!("dropping {:?} for closed tab {}", event, tab_id);
            return;
        };
        self.tabs[index].surface.observe(&event);

        if event.is_content_settled() {
            if matches!(event, SurfaceEvent::LoadStopped) {
                self.tabs[index].tab.loading = false;
            }
            self.sync_from_surface(index);
            return;
        }

        let tab = &mut self.tabs[index].tab;
        match event {
            SurfaceEvent::LoadStarted => {
                tab.loading = true;
                tab.load_error = None;
                tab.title = LOADING_TITLE.to_string();
            }
            SurfaceEvent::TitleUpdated { title } => {
                if tab.load_error.is_none() {
                    tab.title = display_title(&title, &tab.url);
                }
                if self.is_active(tab_id) {
                    self.controls.address = self.tabs[index].tab.url.clone();
                }
            }
            SurfaceEvent::LoadFailed(failure) => {
                if failure.is_benign() {
                    debug!("tab {}: superseded load of {}", tab_id, failure.url);
                    return;
                }
                warn!(
                    "tab {}: failed to load {} ({} {})",
                    tab_id, failure.url, failure.code, failure.description
                );
                tab.loading = false;
                tab.title = Tab::error_title(&failure.description);
                tab.load_error = Some(failure.description);
            }
            _ => {}
        }
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().map(|e| &e.tab).find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> Vec<&Tab> {
        self.tabs.iter().map(|e| &e.tab).collect()
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_index().map(|i| &self.tabs[i].tab)
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn controls(&self) -> &NavControls {
        &self.controls
    }
}
