use simzilla::types::errors::*;

// === TabError Tests ===

#[test]
fn tab_error_not_found_display() {
    let err = TabError::NotFound("tab-123".to_string());
    assert_eq!(err.to_string(), "Tab not found: tab-123");
}

#[test]
fn tab_error_wraps_surface_error() {
    let err: TabError = SurfaceError::Creation("no window".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Tab surface error: Surface creation failed: no window"
    );
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === SurfaceError Tests ===

#[test]
fn surface_error_operation_display() {
    let err = SurfaceError::operation("reload", "webview gone");
    assert_eq!(
        err.to_string(),
        "Surface operation 'reload' failed: webview gone"
    );
}

#[test]
fn surface_error_operation_accepts_any_display() {
    let err = SurfaceError::operation("url", 42);
    match err {
        SurfaceError::Operation { op, reason } => {
            assert_eq!(op, "url");
            assert_eq!(reason, "42");
        }
        other => panic!("unexpected variant: {:?}", other),
    }
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("window.depth".to_string()).to_string(),
        "Invalid settings key: window.depth"
    );
    assert_eq!(
        SettingsError::InvalidValue("width".to_string()).to_string(),
        "Invalid settings value: width"
    );
}

// === ShortcutError Tests ===

#[test]
fn shortcut_error_display_variants() {
    assert_eq!(
        ShortcutError::InvalidKeys("Ctrl+".to_string()).to_string(),
        "Invalid shortcut keys: Ctrl+"
    );
    assert_eq!(
        ShortcutError::UnknownAction("fly".to_string()).to_string(),
        "Unknown shortcut action: fly"
    );
    assert_eq!(
        ShortcutError::Conflict("F5".to_string()).to_string(),
        "Shortcut conflict: F5"
    );
    assert_eq!(
        ShortcutError::NotFound("back".to_string()).to_string(),
        "Shortcut not found: back"
    );
}

// === IpcError Tests ===

#[test]
fn ipc_error_display() {
    assert_eq!(
        IpcError::Malformed("expected value".to_string()).to_string(),
        "Malformed IPC message: expected value"
    );
}
