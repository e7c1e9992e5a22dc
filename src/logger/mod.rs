//! Structured logging for the sweeper
//!
//! Provides the `log(LogTag, "TYPE", message)` API used across the crate:
//! colored console output with aligned tags, base58 address/signature
//! shortening, and a plain-text file copy under logs/.
//!
//! Call `logger::init()` once at startup. `logger::debug` lines are only
//! shown when the binary runs with `--verbose`.

mod file;
mod format;
mod tags;

pub use tags::LogTag;

use crate::arguments::is_verbose_enabled;

/// Initialize the logger system, opening the session log file
pub fn init() {
    file::init_file_logging();
}

/// Log a message to console and file
pub fn log(tag: LogTag, log_type: &str, message: &str) {
    format::format_and_log(tag, log_type, message);
}

/// Log a diagnostic message, shown only with --verbose
pub fn debug(tag: LogTag, message: &str) {
    if is_verbose_enabled() {
        format::format_and_log(tag, "DEBUG", message);
    }
}

/// Force flush pending log writes, call during shutdown
pub fn flush() {
    file::flush_file_logging();
}
