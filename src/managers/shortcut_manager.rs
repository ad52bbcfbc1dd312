//! Shortcut Manager for SimZilla.
//!
//! Maps key combinations to shell actions with conflict detection and
//! platform-specific modifier key adaptation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::ShortcutError;

/// Something a keyboard shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellAction {
    FocusAddress,
    NewTab,
    CloseTab,
    Back,
    Forward,
    Reload,
}

impl ShellAction {
    pub const ALL: [ShellAction; 6] = [
        ShellAction::FocusAddress,
        ShellAction::NewTab,
        ShellAction::CloseTab,
        ShellAction::Back,
        ShellAction::Forward,
        ShellAction::Reload,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShellAction::FocusAddress => "focus_address",
            ShellAction::NewTab => "new_tab",
            ShellAction::CloseTab => "close_tab",
            ShellAction::Back => "back",
            ShellAction::Forward => "forward",
            ShellAction::Reload => "reload",
        }
    }
}

impl fmt::Display for ShellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellAction {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShellAction::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ShortcutError::UnknownAction(s.to_string()))
    }
}

/// A key press with its modifier state, as reported by a `keydown` handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    /// Canonical binding string, e.g. `Ctrl+L` or `Alt+Left`.
    pub fn binding(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.meta {
            parts.push("Cmd".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(normalize_key(&self.key));
        parts.join("+")
    }
}

/// DOM key names to binding key names.
fn normalize_key(key: &str) -> String {
    match key {
        "ArrowLeft" => "Left".to_string(),
        "ArrowRight" => "Right".to_string(),
        "ArrowUp" => "Up".to_string(),
        "ArrowDown" => "Down".to_string(),
        k if k.chars().count() == 1 => k.to_uppercase(),
        k => k.to_string(),
    }
}

/// Parses and canonicalizes a user-written binding such as `cmd+shift+t`.
fn normalize_binding(keys: &str) -> Result<String, ShortcutError> {
    let mut chord = KeyChord::default();
    let mut key = None;
    for part in keys.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "" => return Err(ShortcutError::InvalidKeys(format!("'{}' has an empty key", keys))),
            "ctrl" | "control" => chord.ctrl = true,
            "cmd" | "meta" | "super" => chord.meta = true,
            "alt" | "option" => chord.alt = true,
            "shift" => chord.shift = true,
            _ if key.is_some() => {
                return Err(ShortcutError::InvalidKeys(format!(
                    "'{}' names more than one key",
                    keys
                )))
            }
            _ => key = Some(part.to_string()),
        }
    }
    chord.key = key.ok_or_else(|| ShortcutError::InvalidKeys(format!("'{}' has no key", keys)))?;
    Ok(chord.binding())
}

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn resolve(&self, chord: &KeyChord) -> Option<ShellAction>;
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError>;
    fn bindings_for(&self, action: ShellAction) -> Vec<&str>;
    fn has_conflict(&self, keys: &str, exclude_action: Option<ShellAction>) -> Option<ShellAction>;
    fn reset_to_defaults(&mut self);
}

/// Shortcut manager with in-memory bindings.
pub struct ShortcutManager {
    /// Canonical key binding to action.
    bindings: HashMap<String, ShellAction>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }

    /// Default bindings plus user overrides (action name to keys). Invalid
    /// overrides are skipped and returned so the caller can report them.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> (Self, Vec<ShortcutError>) {
        let mut mgr = Self::new();
        let mut errors = Vec::new();
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();
        for (action, keys) in entries {
            if let Err(e) = mgr.register_shortcut(action, keys) {
                errors.push(e);
            }
        }
        (mgr, errors)
    }

    /// Every action accepts both the Ctrl and the Cmd form, on all platforms.
    fn default_bindings() -> HashMap<String, ShellAction> {
        let defaults = [
            ("Ctrl+L", ShellAction::FocusAddress),
            ("Cmd+L", ShellAction::FocusAddress),
            ("Ctrl+T", ShellAction::NewTab),
            ("Cmd+T", ShellAction::NewTab),
            ("Ctrl+W", ShellAction::CloseTab),
            ("Cmd+W", ShellAction::CloseTab),
            ("Alt+Left", ShellAction::Back),
            ("Cmd+[", ShellAction::Back),
            ("Alt+Right", ShellAction::Forward),
            ("Cmd+]", ShellAction::Forward),
            ("F5", ShellAction::Reload),
            ("Ctrl+R", ShellAction::Reload),
            ("Cmd+R", ShellAction::Reload),
        ];

        defaults
            .into_iter()
            .map(|(k, a)| (k.to_string(), a))
            .collect()
    }

    /// Adapts `Ctrl` to `Cmd` on macOS for user-registered bindings.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn resolve(&self, chord: &KeyChord) -> Option<ShellAction> {
        self.bindings.get(&chord.binding()).copied()
    }

    /// Binds `keys` to `action`, replacing that action's existing bindings.
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError> {
        let action: ShellAction = action.parse()?;
        if keys.trim().is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        let binding = Self::adapt_for_platform(&normalize_binding(keys)?);
        if let Some(conflicting) = self.has_conflict(&binding, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                binding, conflicting
            )));
        }

        self.bindings.retain(|_, a| *a != action);
        self.bindings.insert(binding, action);
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError> {
        let action: ShellAction = action.parse()?;
        let before = self.bindings.len();
        self.bindings.retain(|_, a| *a != action);
        if self.bindings.len() == before {
            return Err(ShortcutError::NotFound(action.to_string()));
        }
        Ok(())
    }

    fn bindings_for(&self, action: ShellAction) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<ShellAction>) -> Option<ShellAction> {
        let binding = normalize_binding(keys).ok()?;
        let binding = Self::adapt_for_platform(&binding);
        self.bindings
            .get(&binding)
            .copied()
            .filter(|a| Some(*a) != exclude_action)
    }

    fn reset_to_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }
}
