//! `wry` child webviews as rendering surfaces.
//!
//! Engine callbacks never touch shell state directly: they post
//! [`UserEvent`]s through the `tao` event-loop proxy and the event loop feeds
//! them to the tab manager.

use std::cell::Cell;
use std::rc::Rc;

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::surface::history::NavigationHistory;
use crate::surface::{RenderingSurface, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::event::SurfaceEvent;

/// Width of the tab sidebar drawn by the chrome page.
pub const SIDEBAR_WIDTH: f64 = 220.0;
/// Height of the toolbar drawn by the chrome page.
pub const TOOLBAR_HEIGHT: f64 = 44.0;

/// Injected into every content page: forwards shortcut key presses and
/// in-page address changes to the host.
const CONTENT_JS: &str = include_str!("../../resources/ui/content.js");

/// Messages delivered to the event loop.
#[derive(Debug)]
pub enum UserEvent {
    Surface { tab_id: String, event: SurfaceEvent },
    Chrome(String),
    Content { tab_id: String, body: String },
    OpenTab(String),
}

/// Logical window size, used to place the chrome and content webviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn of(window: &Window) -> Self {
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        Self {
            width: size.width,
            height: size.height,
        }
    }

    pub fn chrome_rect(&self) -> Rect {
        Rect {
            position: LogicalPosition::new(0.0, 0.0).into(),
            size: LogicalSize::new(self.width, self.height).into(),
        }
    }

    pub fn content_rect(&self) -> Rect {
        Rect {
            position: LogicalPosition::new(SIDEBAR_WIDTH, TOOLBAR_HEIGHT).into(),
            size: LogicalSize::new(
                (self.width - SIDEBAR_WIDTH).max(0.0),
                (self.height - TOOLBAR_HEIGHT).max(0.0),
            )
            .into(),
        }
    }
}

/// Builds one child webview per tab.
pub struct WebViewFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    layout: Rc<Cell<Layout>>,
}

impl WebViewFactory {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        layout: Rc<Cell<Layout>>,
    ) -> Self {
        Self {
            window,
            proxy,
            layout,
        }
    }
}

impl SurfaceFactory for WebViewFactory {
    type Surface = WebViewSurface;

    fn create(&mut self, tab_id: &str, url: &str) -> Result<WebViewSurface, SurfaceError> {
        let load_proxy = self.proxy.clone();
        let load_tab = tab_id.to_string();
        let title_proxy = self.proxy.clone();
        let title_tab = tab_id.to_string();
        let ipc_proxy = self.proxy.clone();
        let ipc_tab = tab_id.to_string();
        let nw_proxy = self.proxy.clone();

        let webview = WebViewBuilder::new()
            .with_url(url)
            .with_bounds(self.layout.get().content_rect())
            .with_visible(false)
            .with_initialization_script(CONTENT_JS)
            .with_on_page_load_handler(move |event, url| {
                let events = match event {
                    PageLoadEvent::Started => vec![SurfaceEvent::LoadStarted],
                    PageLoadEvent::Finished => vec![
                        SurfaceEvent::Navigated { url },
                        SurfaceEvent::LoadStopped,
                    ],
                };
                for event in events {
                    let _ = load_proxy.send_event(UserEvent::Surface {
                        tab_id: load_tab.clone(),
                        event,
                    });
                }
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::Surface {
                    tab_id: title_tab.clone(),
                    event: SurfaceEvent::TitleUpdated { title },
                });
            })
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                let _ = ipc_proxy.send_event(UserEvent::Content {
                    tab_id: ipc_tab.clone(),
                    body: msg.body().clone(),
                });
            })
            .with_new_window_req_handler(move |url, _features| {
                if url.starts_with("http://") || url.starts_with("https://") {
                    let _ = nw_proxy.send_event(UserEvent::OpenTab(url));
                }
                wry::NewWindowResponse::Deny
            })
            .with_devtools(cfg!(debug_assertions))
            .build_as_child(&*self.window)
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        Ok(WebViewSurface {
            webview,
            history: NavigationHistory::new(),
            title: String::new(),
        })
    }
}

/// A tab's webview plus the state `wry` does not expose: history position
/// and document title.
pub struct WebViewSurface {
    webview: WebView,
    history: NavigationHistory,
    title: String,
}

impl WebViewSurface {
    pub fn set_bounds(&self, rect: Rect) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(rect)
            .map_err(|e| SurfaceError::operation("set_bounds", e))
    }

    /// Runs a history traversal script; a request the engine rejected leaves
    /// nothing pending.
    fn traverse(&mut self, op: &'static str, js: &str) -> Result<(), SurfaceError> {
        let result = self
            .webview
            .evaluate_script(js)
            .map_err(|e| SurfaceError::operation(op, e));
        if result.is_err() {
            self.history.cancel_pending();
        }
        result
    }
}

impl RenderingSurface for WebViewSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.history.cancel_pending();
        self.webview
            .load_url(url)
            .map_err(|e| SurfaceError::operation("load_url", e))
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.webview
            .reload()
            .map_err(|e| SurfaceError::operation("reload", e))
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        if self.history.begin_back().is_none() {
            return Ok(());
        }
        self.traverse("go_back", "history.back()")
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        if self.history.begin_forward().is_none() {
            return Ok(());
        }
        self.traverse("go_forward", "history.forward()")
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn url(&self) -> Result<String, SurfaceError> {
        self.webview
            .url()
            .map_err(|e| SurfaceError::operation("url", e))
    }

    fn title(&self) -> Result<String, SurfaceError> {
        Ok(self.title.clone())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| SurfaceError::operation("set_visible", e))
    }

    fn observe(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::Navigated { url } => {
                // A different document; its title arrives separately.
                if self.history.current() != Some(url.as_str()) {
                    self.title.clear();
                }
                self.history.commit(url);
            }
            SurfaceEvent::NavigatedInPage { url } => self.history.commit(url),
            SurfaceEvent::TitleUpdated { title } => self.title = title.clone(),
            _ => {}
        }
    }
}
