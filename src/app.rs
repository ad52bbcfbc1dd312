//! App Core for SimZilla.
//!
//! Holds the settings, shortcut bindings and tab manager for one window and
//! turns chrome commands and shortcut actions into tab manager calls.

use log::{debug, error, info, warn};

use crate::ipc::ChromeCommand;
use crate::managers::shortcut_manager::{
    KeyChord, ShellAction, ShortcutManager, ShortcutManagerTrait,
};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::address::AddressResolver;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::surface::SurfaceFactory;
use crate::types::errors::TabError;
use crate::types::event::SurfaceEvent;

/// Effects the host UI has to carry out itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    FocusAddress,
}

/// Central application struct for one browser window.
pub struct App<F: SurfaceFactory> {
    pub settings_engine: SettingsEngine,
    pub shortcut_manager: ShortcutManager,
    pub tab_manager: TabManager<F>,
}

impl<F: SurfaceFactory> App<F> {
    /// Builds the app from already-loaded settings.
    pub fn new(settings_engine: SettingsEngine, factory: F) -> Self {
        let settings = settings_engine.get_settings();
        let resolver = AddressResolver::from_settings(settings);

        let (shortcut_manager, rejected) = ShortcutManager::with_overrides(&settings.shortcuts);
        for e in rejected {
            warn!("ignoring shortcut override: {}", e);
        }

        Self {
            settings_engine,
            shortcut_manager,
            tab_manager: TabManager::new(factory, resolver),
        }
    }

    /// Opens the first tab at the homepage.
    pub fn startup(&mut self) -> Result<(), TabError> {
        if self.tab_manager.tab_count() == 0 {
            let homepage = self.tab_manager.homepage().to_string();
            let id = self.tab_manager.create_tab(&homepage)?;
            info!("startup: opened tab {}", id);
        }
        Ok(())
    }

    /// Runs a shortcut action. Actions other than opening a tab do nothing
    /// without an active tab.
    pub fn dispatch(&mut self, action: ShellAction) -> Option<UiEffect> {
        if action != ShellAction::NewTab && self.tab_manager.get_active_tab().is_none() {
            debug!("{} ignored: no active tab", action);
            return None;
        }

        match action {
            ShellAction::FocusAddress => return Some(UiEffect::FocusAddress),
            ShellAction::NewTab => self.open_homepage_tab(),
            ShellAction::CloseTab => {
                if let Some(id) = self.tab_manager.active_tab_id().map(str::to_string) {
                    self.close_tab(&id);
                }
            }
            ShellAction::Back => self.tab_manager.go_back(),
            ShellAction::Forward => self.tab_manager.go_forward(),
            ShellAction::Reload => self.tab_manager.reload(),
        }
        None
    }

    /// Handles a message from the chrome page.
    pub fn handle_command(&mut self, command: ChromeCommand) -> Option<UiEffect> {
        match command {
            ChromeCommand::Ready => {}
            ChromeCommand::Navigate { input } => self.tab_manager.navigate(&input),
            ChromeCommand::Back => self.tab_manager.go_back(),
            ChromeCommand::Forward => self.tab_manager.go_forward(),
            ChromeCommand::Reload => self.tab_manager.reload(),
            ChromeCommand::NewTab => self.open_homepage_tab(),
            ChromeCommand::CloseTab { id: Some(id) } => self.close_tab(&id),
            ChromeCommand::CloseTab { id: None } => return self.dispatch(ShellAction::CloseTab),
            ChromeCommand::ActivateTab { id } => {
                self.tab_manager.activate_tab(&id);
            }
            ChromeCommand::Key(chord) => return self.handle_key(&chord),
            ChromeCommand::Location { url } => {
                debug!("chrome page reported its own location {}, ignoring", url);
            }
        }
        None
    }

    /// Handles a message posted by the content page of `tab_id`.
    pub fn handle_content_message(
        &mut self,
        tab_id: &str,
        command: ChromeCommand,
    ) -> Option<UiEffect> {
        match command {
            ChromeCommand::Location { url } => {
                self.tab_manager
                    .on_surface_event(tab_id, SurfaceEvent::NavigatedInPage { url });
                None
            }
            ChromeCommand::Key(chord) => self.handle_key(&chord),
            other => {
                warn!("content page of tab {} sent {:?}, ignoring", tab_id, other);
                None
            }
        }
    }

    fn handle_key(&mut self, chord: &KeyChord) -> Option<UiEffect> {
        let action = self.shortcut_manager.resolve(chord)?;
        debug!("shortcut {} -> {}", chord.binding(), action);
        self.dispatch(action)
    }

    fn open_homepage_tab(&mut self) {
        let homepage = self.tab_manager.homepage().to_string();
        if let Err(e) = self.tab_manager.create_tab(&homepage) {
            error!("failed to open tab: {}", e);
        }
    }

    fn close_tab(&mut self, tab_id: &str) {
        if let Err(e) = self.tab_manager.close_tab(tab_id) {
            warn!("failed to close tab {}: {}", tab_id, e);
        }
    }
}
