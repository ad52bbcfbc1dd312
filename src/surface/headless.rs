//! In-process rendering surface.
//!
//! `HeadlessSurface` behaves like an engine that loads instantly: it updates
//! its own history at request time and queues the event sequence a real
//! engine would report into a shared [`HeadlessWorld`] outbox. The host pumps
//! the outbox into the tab manager, so state is always read back from the
//! surface exactly as it would be with a real engine. The world also scripts
//! redirects, load failures, page titles and failing operations.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use url::Url;

use crate::managers::tab_manager::TabManagerTrait;
use crate::surface::history::NavigationHistory;
use crate::surface::{RenderingSurface, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::event::{LoadFailure, SurfaceEvent};

#[derive(Debug, Default)]
struct WorldState {
    outbox: VecDeque<(String, SurfaceEvent)>,
    redirects: HashMap<String, String>,
    failures: HashMap<String, (i32, String)>,
    titles: HashMap<String, String>,
    failing_ops: HashSet<&'static str>,
    fail_creation: bool,
    live: Vec<String>,
}

/// Shared environment for headless surfaces: scripted behaviour plus the
/// queue of events they have reported.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    state: Rc<RefCell<WorldState>>,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> HeadlessFactory {
        HeadlessFactory {
            world: self.clone(),
        }
    }

    /// Loads of `from` end up at `to`.
    pub fn redirect(&self, from: &str, to: &str) {
        self.state
            .borrow_mut()
            .redirects
            .insert(from.to_string(), to.to_string());
    }

    /// Loads of `url` fail with the given engine error code.
    pub fn fail_load(&self, url: &str, code: i32, description: &str) {
        self.state
            .borrow_mut()
            .failures
            .insert(url.to_string(), (code, description.to_string()));
    }

    /// Document title reported for `url`; defaults to the URL's host.
    pub fn set_title(&self, url: &str, title: &str) {
        self.state
            .borrow_mut()
            .titles
            .insert(url.to_string(), title.to_string());
    }

    /// Makes the named surface operation (`"load_url"`, `"reload"`,
    /// `"go_back"`, `"go_forward"`, `"url"`, `"set_visible"`) return an error.
    pub fn fail_operation(&self, op: &'static str) {
        self.state.borrow_mut().failing_ops.insert(op);
    }

    pub fn restore_operation(&self, op: &'static str) {
        self.state.borrow_mut().failing_ops.remove(op);
    }

    pub fn fail_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_creation = fail;
    }

    /// Queues an arbitrary event as if the surface of `tab_id` reported it.
    pub fn emit(&self, tab_id: &str, event: SurfaceEvent) {
        self.state
            .borrow_mut()
            .outbox
            .push_back((tab_id.to_string(), event));
    }

    /// Takes every queued event in report order.
    pub fn drain(&self) -> Vec<(String, SurfaceEvent)> {
        self.state.borrow_mut().outbox.drain(..).collect()
    }

    /// Feeds queued events into `manager` until the outbox is empty.
    /// Returns how many were delivered.
    pub fn deliver<M: TabManagerTrait>(&self, manager: &mut M) -> usize {
        let mut delivered = 0;
        loop {
            let batch = self.drain();
            if batch.is_empty() {
                return delivered;
            }
            for (tab_id, event) in batch {
                manager.on_surface_event(&tab_id, event);
                delivered += 1;
            }
        }
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().outbox.len()
    }

    /// Tab ids whose surfaces have not been dropped yet.
    pub fn live_surfaces(&self) -> Vec<String> {
        self.state.borrow().live.clone()
    }

    fn check(&self, op: &'static str) -> Result<(), SurfaceError> {
        if self.state.borrow().failing_ops.contains(op) {
            return Err(SurfaceError::operation(op, "scripted failure"));
        }
        Ok(())
    }

    fn resolve(&self, url: &str) -> Result<String, LoadFailure> {
        let state = self.state.borrow();
        if let Some((code, description)) = state.failures.get(url) {
            return Err(LoadFailure::new(*code, description.clone(), url));
        }
        Ok(state
            .redirects
            .get(url)
            .cloned()
            .unwrap_or_else(|| url.to_string()))
    }

    fn title_for(&self, url: &str) -> String {
        if let Some(title) = self.state.borrow().titles.get(url) {
            return title.clone();
        }
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }
}

/// Creates [`HeadlessSurface`]s bound to one world.
#[derive(Debug, Clone)]
pub struct HeadlessFactory {
    world: HeadlessWorld,
}

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn create(&mut self, tab_id: &str, url: &str) -> Result<HeadlessSurface, SurfaceError> {
        if self.world.state.borrow().fail_creation {
            return Err(SurfaceError::Creation("scripted failure".to_string()));
        }
        self.world.state.borrow_mut().live.push(tab_id.to_string());

        let mut surface = HeadlessSurface {
            tab_id: tab_id.to_string(),
            world: self.world.clone(),
            history: NavigationHistory::new(),
            title: String::new(),
            visible: false,
            requested: Vec::new(),
        };
        surface.start_load(url);
        Ok(surface)
    }
}

/// A surface that completes every load immediately.
#[derive(Debug)]
pub struct HeadlessSurface {
    tab_id: String,
    world: HeadlessWorld,
    history: NavigationHistory,
    title: String,
    visible: bool,
    requested: Vec<String>,
}

impl HeadlessSurface {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Every address this surface was asked to load, oldest first.
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    fn emit(&self, event: SurfaceEvent) {
        self.world.emit(&self.tab_id, event);
    }

    fn start_load(&mut self, url: &str) {
        self.requested.push(url.to_string());
        self.emit(SurfaceEvent::LoadStarted);
        match self.world.resolve(url) {
            Ok(target) => self.complete(&target),
            Err(failure) => {
                self.emit(SurfaceEvent::LoadFailed(failure));
                self.emit(SurfaceEvent::LoadStopped);
            }
        }
    }

    fn complete(&mut self, url: &str) {
        self.history.commit(url);
        self.title = self.world.title_for(url);
        self.emit(SurfaceEvent::Navigated {
            url: url.to_string(),
        });
        self.emit(SurfaceEvent::TitleUpdated {
            title: self.title.clone(),
        });
        self.emit(SurfaceEvent::DomReady);
        self.emit(SurfaceEvent::FinishedLoad);
        self.emit(SurfaceEvent::LoadStopped);
    }

    fn traverse(&mut self, target: Option<String>) {
        if let Some(url) = target {
            self.emit(SurfaceEvent::LoadStarted);
            self.complete(&url);
        }
    }
}

impl RenderingSurface for HeadlessSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.world.check("load_url")?;
        self.history.cancel_pending();
        self.start_load(url);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.world.check("reload")?;
        let current = self.history.current().map(str::to_string);
        self.traverse(current);
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.world.check("go_back")?;
        let target = self.history.begin_back().map(str::to_string);
        self.traverse(target);
        Ok(())
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.world.check("go_forward")?;
        let target = self.history.begin_forward().map(str::to_string);
        self.traverse(target);
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn url(&self) -> Result<String, SurfaceError> {
        self.world.check("url")?;
        Ok(self.history.current().unwrap_or_default().to_string())
    }

    fn title(&self) -> Result<String, SurfaceError> {
        Ok(self.title.clone())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.world.check("set_visible")?;
        self.visible = visible;
        Ok(())
    }

    /// In-page navigations start in the page itself; the surface only hears
    /// of them through the event.
    fn observe(&mut self, event: &SurfaceEvent) {
        if let SurfaceEvent::NavigatedInPage { url } = event {
            self.history.commit(url);
        }
    }
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.world
            .state
            .borrow_mut()
            .live
            .retain(|id| id != &self.tab_id);
    }
}
