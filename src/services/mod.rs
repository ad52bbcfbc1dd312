// SimZilla services
// Stateless or file-backed helpers: address interpretation and settings persistence.

pub mod address;
pub mod settings_engine;
