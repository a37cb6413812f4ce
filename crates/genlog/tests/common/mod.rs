//! Shared helpers for integration tests.

use genlog::{kv, Logger};

/// The one method these helpers need from a logger.
pub trait InfoLogger {
    /// Logs a message without key/value pairs.
    fn info(&self, message: &str);
}

impl InfoLogger for Logger {
    #[track_caller]
    fn info(&self, message: &str) {
        Logger::info(self, message, kv![]);
    }
}

/// Logs from this file so tests can check the reported caller. Returns the
/// line of the logging call.
#[inline(never)]
pub fn log_something_from_other_file<L: InfoLogger>(log: &L) -> u32 {
    log.info("test caller");
    line!() - 1
}
