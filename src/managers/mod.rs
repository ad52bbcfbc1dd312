// SimZilla state managers
// Managers handle stateful operations: tabs and keyboard shortcuts.

pub mod shortcut_manager;
pub mod tab_manager;
