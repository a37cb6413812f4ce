//! Helpers for logging from tests.
//!
//! [`new_for_testing`] binds a logger to anything implementing the
//! one-method [`TestLog`] trait. [`StdoutTestLog`] prints through
//! `println!`, so the default test harness captures the output and only
//! shows it for failing tests.

use crate::entry::Entry;
use crate::logger::Logger;

/// The part of a test reporter needed to log through it.
pub trait TestLog: Send + Sync {
    /// Reports one line of output.
    fn log(&self, line: &str);
}

/// Test reporter printing to the captured standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTestLog;

impl TestLog for StdoutTestLog {
    fn log(&self, line: &str) {
        println!("{line}");
    }
}

/// Returns a logger that reports every entry, rendered, to `t`.
///
/// Caller locations reported by the test reporter itself point at this
/// module; enable [`Logger::with_caller`] to get the real call site in the
/// entry.
pub fn new_for_testing(t: impl TestLog + 'static) -> Logger {
    Logger::new(move |e: &Entry| t.log(&e.to_string()))
}

impl Logger {
    /// Shorthand for [`new_for_testing`].
    pub fn for_testing(t: impl TestLog + 'static) -> Self {
        new_for_testing(t)
    }
}
