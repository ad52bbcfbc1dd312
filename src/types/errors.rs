use thiserror::Error;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    NotFound(String),
    /// The tab's rendering surface could not be created.
    #[error("Tab surface error: {0}")]
    Surface(#[from] SurfaceError),
}

// === SurfaceError ===

/// Errors reported by a rendering surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The host failed to instantiate a new surface.
    #[error("Surface creation failed: {0}")]
    Creation(String),
    /// A request on a live surface was rejected.
    #[error("Surface operation '{op}' failed: {reason}")]
    Operation { op: &'static str, reason: String },
}

impl SurfaceError {
    pub fn operation(op: &'static str, reason: impl ToString) -> Self {
        SurfaceError::Operation {
            op,
            reason: reason.to_string(),
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// The key combination could not be parsed.
    #[error("Invalid shortcut keys: {0}")]
    InvalidKeys(String),
    /// The action name does not correspond to any shell action.
    #[error("Unknown shortcut action: {0}")]
    UnknownAction(String),
    /// The key combination is already bound to another action.
    #[error("Shortcut conflict: {0}")]
    Conflict(String),
    /// No binding exists for the action.
    #[error("Shortcut not found: {0}")]
    NotFound(String),
}

// === IpcError ===

/// Errors raised while decoding messages from the chrome or content pages.
#[derive(Debug, Error)]
pub enum IpcError {
    /// The message is not valid JSON or does not match any known command.
    #[error("Malformed IPC message: {0}")]
    Malformed(String),
}
