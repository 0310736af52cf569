#![deny(missing_docs)]
//! Log macros for newsdesk.
//!
//! `newsdesk_core` logs controller transitions (job launched, completed,
//! failed, stale events dropped) without touching IO, and `newsdesk_engine`
//! logs HTTP failures and scheduler activity from its runtime thread. Neither
//! installs a logger: the `newsdesk` binary routes records to stderr or
//! `newsdesk.log` per `--log`, and test suites call [`initialize_for_tests`].

/// Trace-level record, used for every status poll snapshot.
#[macro_export]
macro_rules! desk_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Debug-level record, used for ignored or skipped controller events.
#[macro_export]
macro_rules! desk_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Info-level record.
#[macro_export]
macro_rules! desk_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Warn-level record, used for job failures and rejected backend calls.
#[macro_export]
macro_rules! desk_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level record, used when a news card cannot be written.
#[macro_export]
macro_rules! desk_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Sends test logs to the terminal without colour.
///
/// Each integration test binary may call this from every test; only the first
/// call installs the logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    )]);
}
