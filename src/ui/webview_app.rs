//! WebView-based browser window using `wry` + `tao`.
//!
//! Architecture:
//! - one `tao` window; a full-size chrome webview draws the tab sidebar and
//!   toolbar (`resources/ui/chrome.html`)
//! - one child webview per tab, stacked over the content area; only the
//!   active one is visible
//! - every engine callback and IPC message becomes a [`UserEvent`] handled
//!   on the event loop, the single place shell state changes

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use log::{debug, info, warn};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::{WebView, WebViewBuilder};

use crate::app::{App, UiEffect};
use crate::ipc::{self, FOCUS_ADDRESS_SCRIPT};
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::ui::webview_surface::{Layout, UserEvent, WebViewFactory};

const CHROME_HTML: &str = include_str!("../../resources/ui/chrome.html");

fn handle_user_event(app: &mut App<WebViewFactory>, event: UserEvent) -> Option<UiEffect> {
    match event {
        UserEvent::Surface { tab_id, event } => {
            debug!("[SURFACE] {} {:?}", tab_id, event);
            app.tab_manager.on_surface_event(&tab_id, event);
            None
        }
        UserEvent::Chrome(body) => match ipc::parse_message(&body) {
            Ok(command) => app.handle_command(command),
            Err(e) => {
                warn!("[IPC] {}", e);
                None
            }
        },
        UserEvent::Content { tab_id, body } => match ipc::parse_message(&body) {
            Ok(command) => app.handle_content_message(&tab_id, command),
            Err(e) => {
                warn!("[IPC] tab {}: {}", tab_id, e);
                None
            }
        },
        UserEvent::OpenTab(url) => {
            info!("[NW] {}", url);
            if let Err(e) = app.tab_manager.create_tab(&url) {
                warn!("failed to open {} in a new tab: {}", url, e);
            }
            None
        }
    }
}

fn render(chrome: &WebView, app: &App<WebViewFactory>) {
    if let Err(e) = chrome.evaluate_script(&ipc::render_script(&app.tab_manager)) {
        warn!("failed to update chrome: {}", e);
    }
}

/// Opens the browser window and runs the event loop until it closes.
pub fn run(settings_engine: SettingsEngine) -> Result<(), Box<dyn Error>> {
    let window_settings = settings_engine.get_settings().window.clone();

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title(&window_settings.title)
            .with_inner_size(tao::dpi::LogicalSize::new(
                window_settings.width as f64,
                window_settings.height as f64,
            ))
            .build(&event_loop)?,
    );
    let layout = Rc::new(Cell::new(Layout::of(&window)));

    let chrome_proxy = proxy.clone();
    let chrome = WebViewBuilder::new()
        .with_html(CHROME_HTML)
        .with_bounds(layout.get().chrome_rect())
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = chrome_proxy.send_event(UserEvent::Chrome(msg.body().clone()));
        })
        .with_devtools(cfg!(debug_assertions))
        .build_as_child(&*window)?;

    let factory = WebViewFactory::new(window.clone(), proxy, layout.clone());
    let mut app = App::new(settings_engine, factory);
    app.startup()?;
    render(&chrome, &app);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                let current = Layout::of(&window);
                layout.set(current);
                if let Err(e) = chrome.set_bounds(current.chrome_rect()) {
                    warn!("failed to resize chrome: {}", e);
                }
                app.tab_manager.for_each_surface(|surface| {
                    if let Err(e) = surface.set_bounds(current.content_rect()) {
                        warn!("failed to resize tab: {}", e);
                    }
                });
            }

            Event::UserEvent(user_event) => {
                if let Some(UiEffect::FocusAddress) = handle_user_event(&mut app, user_event) {
                    let _ = chrome.evaluate_script(FOCUS_ADDRESS_SCRIPT);
                }
                render(&chrome, &app);
            }

            _ => {}
        }
    })
}
