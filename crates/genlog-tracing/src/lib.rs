//! # genlog-tracing
//!
//! Forwards [`genlog`] entries to the [`tracing`] ecosystem.
//!
//! Verbosity levels map onto tracing levels through [`Severity::from_level`]:
//! level 0 is `INFO`, 1 is `DEBUG`, 2 and above `TRACE`, -1 is `WARN` and
//! -2 and below `ERROR`. Each event carries the logger name as `component`,
//! the error message (if any) as `error`, and the rendered key/value pairs
//! as `fields`.
//!
//! ## Example
//!
//! ```rust
//! use genlog::kv;
//!
//! let log = genlog_tracing::logger();
//! log.with_name("db").v(-1).info("slow query", kv!["ms", 1200]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use genlog::formatter::flatten;
use genlog::{Entry, LogSink, Logger, Severity};
use tracing::Level;

/// Target used for every forwarded event.
pub const TARGET: &str = "genlog";

/// Converts a severity to the matching `tracing::Level`.
#[must_use]
pub const fn tracing_level(severity: Severity) -> Level {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warn => Level::WARN,
        Severity::Info => Level::INFO,
        Severity::Debug => Level::DEBUG,
        Severity::Trace => Level::TRACE,
    }
}

/// Sink emitting each entry as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

macro_rules! emit {
    ($level:expr, $name:ident, $message:ident, $error:ident, $caller:ident, $fields:ident) => {
        tracing::event!(
            target: TARGET,
            $level,
            component = %$name,
            error = $error,
            caller = $caller,
            fields = %$fields,
            "{}",
            $message
        )
    };
}

impl LogSink for TracingSink {
    fn log(&self, entry: &Entry) {
        let name: &str = &entry.name;
        let message = entry.message.as_str();
        let error = entry.error.as_ref().map(ToString::to_string);
        let error = error.as_deref();
        let caller = entry.caller.as_ref().map(ToString::to_string);
        let caller = caller.as_deref();
        let fields = flatten(&entry.fields);

        match Severity::from_level(entry.level) {
            Severity::Error => emit!(Level::ERROR, name, message, error, caller, fields),
            Severity::Warn => emit!(Level::WARN, name, message, error, caller, fields),
            Severity::Info => emit!(Level::INFO, name, message, error, caller, fields),
            Severity::Debug => emit!(Level::DEBUG, name, message, error, caller, fields),
            Severity::Trace => emit!(Level::TRACE, name, message, error, caller, fields),
        }
    }
}

/// Returns a root logger bound to a [`TracingSink`].
#[must_use]
pub fn logger() -> Logger {
    Logger::new(TracingSink::new())
}
