#![deny(missing_docs)]
//! Logging front door for the bridge crates.
//!
//! Core, engine and app never call `log` directly; they go through the
//! `bridge_*` macros below. The binary decides where records end up, tests
//! route them to the terminal with [`initialize_for_tests`].

/// Very chatty detail, such as per-frame UI bookkeeping.
#[macro_export]
macro_rules! bridge_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Diagnostic detail: dispatch start, response sizes.
#[macro_export]
macro_rules! bridge_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Normal lifecycle: backend URL changes, dispatch results.
#[macro_export]
macro_rules! bridge_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Recoverable problems: rejected URLs, unreadable storage, failed dispatches.
#[macro_export]
macro_rules! bridge_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Failures the user cannot fix from the panel, such as a dead engine thread.
#[macro_export]
macro_rules! bridge_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Verbosity for test runs: `Debug` in debug builds, `Info` in release.
pub fn test_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Sends log records from tests to the terminal.
///
/// Only the first call installs the logger; later calls are ignored, so every
/// test can call it.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
