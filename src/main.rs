//! SimZilla: a minimal multi-tab web browser shell.
//!
//! Entry point: loads settings, installs logging and opens the browser window.
//! When built without the `gui` feature, runs a console demo over headless surfaces.

use log::{error, warn};

use simzilla::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

fn load_settings() -> SettingsEngine {
    let mut engine = SettingsEngine::new(None);
    let loaded = engine.load();
    let level = engine.get_settings().log_level.clone();
    if let Err(e) = simzilla::logging::init(&level) {
        eprintln!("logger already installed: {}", e);
    }
    if let Err(e) = loaded {
        warn!("using default settings: {}", e);
    }
    engine
}

#[cfg(feature = "gui")]
fn main() {
    let settings = load_settings();
    if let Err(e) = simzilla::ui::webview_app::run(settings) {
        error!("failed to start browser window: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use simzilla::app::App;
    use simzilla::managers::tab_manager::TabManagerTrait;
    use simzilla::surface::headless::HeadlessWorld;
    use simzilla::types::event::ERR_ABORTED;

    let world = HeadlessWorld::new();
    world.redirect("https://rust-lang.org", "https://www.rust-lang.org/");
    world.set_title("https://www.rust-lang.org/", "Rust Programming Language");
    world.fail_load("https://unreachable.invalid", -105, "ERR_NAME_NOT_RESOLVED");

    let mut app = App::new(load_settings(), world.factory());
    if let Err(e) = app.startup() {
        error!("failed to open first tab: {}", e);
        std::process::exit(1);
    }

    println!();
    println!("SimZilla v{} - demo mode (headless surfaces)", env!("CARGO_PKG_VERSION"));
    println!();

    let step = |label: &str, app: &mut App<_>| {
        world.deliver(&mut app.tab_manager);
        println!("── {}", label);
        let active = app.tab_manager.active_tab_id().map(str::to_string);
        for tab in app.tab_manager.get_all_tabs() {
            let marker = if Some(&tab.id) == active.as_ref() { '*' } else { ' ' };
            println!("  {} {:<28} {}", marker, tab.title, tab.url);
        }
        let controls = app.tab_manager.controls();
        println!(
            "  address: {}  back: {}  forward: {}",
            controls.address, controls.can_go_back, controls.can_go_forward
        );
        println!();
    };

    step("startup", &mut app);

    app.tab_manager.navigate("rust-lang.org");
    step("navigate rust-lang.org (redirected)", &mut app);

    app.tab_manager.navigate("ownership and borrowing");
    step("search query", &mut app);

    app.tab_manager.go_back();
    step("back", &mut app);

    if let Some(id) = app.tab_manager.active_tab_id().map(str::to_string) {
        world.emit(
            &id,
            simzilla::types::event::SurfaceEvent::LoadFailed(
                simzilla::types::event::LoadFailure::new(ERR_ABORTED, "ERR_ABORTED", ""),
            ),
        );
    }
    step("superseded load ignored", &mut app);

    if let Err(e) = app.tab_manager.create_tab("https://unreachable.invalid") {
        error!("failed to open tab: {}", e);
    }
    step("new tab with failing load", &mut app);

    if let Some(id) = app.tab_manager.active_tab_id().map(str::to_string) {
        if let Err(e) = app.tab_manager.close_tab(&id) {
            warn!("failed to close tab {}: {}", id, e);
        }
    }
    step("close active tab", &mut app);

    if let Some(id) = app.tab_manager.active_tab_id().map(str::to_string) {
        if let Err(e) = app.tab_manager.close_tab(&id) {
            warn!("failed to close tab {}: {}", id, e);
        }
    }
    step("close last tab (replaced by homepage)", &mut app);
}
