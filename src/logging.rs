//! Terminal logging for the SimZilla binary.

use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Parses a level name from settings; unknown names fall back to `info`.
pub fn level_from_name(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs a stderr logger at the given level.
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    TermLogger::init(
        level_from_name(level),
        ConfigBuilder::new()
            .add_filter_allow_str("simzilla")
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
