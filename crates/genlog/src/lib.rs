//! # genlog
//!
//! Generic structured logging with a pluggable sink.
//!
//! A [`Logger`] collects a verbosity level, a dotted name and key/value
//! context; every finished log call becomes an [`Entry`] that is handed,
//! synchronously, to a single [`LogSink`]. The sink decides how to write it.
//!
//! This crate provides:
//!
//! - [`Logger`] — Immutable, chainable logger front-end
//! - [`Entry`] — A finished log entry with a human-readable rendering
//! - [`Value`] — Loggable key/value type, built with the [`kv!`] macro
//! - [`LogSink`] — Sink trait, implemented for `Fn(&Entry)` closures
//! - [`WriterSink`] / [`RecordingSink`] — Ready-made sinks
//! - [`Severity`] — Mapping from verbosity levels to fixed severities
//! - [`LoggerConfig`] — Settings loaded from JSON or the environment
//!
//! ## Example
//!
//! ```rust
//! use genlog::{kv, Entry, Logger};
//!
//! let log = Logger::new(|e: &Entry| println!("LOG: {e}"));
//!
//! log.v(0).info("hello world at info level", kv![]);
//! log.with_name("some")
//!     .with_name("component")
//!     .with_values(kv!["foo", 42])
//!     .v(1)
//!     .info("event", kv!["extra", "someval1"]);
//! // LOG: [0]  "hello world at info level"
//! // LOG: [1] some.component "event" extra="someval1" foo=42
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod entry;
pub mod error;
pub mod formatter;
pub mod logger;
pub mod severity;
pub mod sink;
pub mod testing;
pub mod value;

// Re-export main types
pub use config::{LoggerConfig, DEFAULT_VERBOSITY};
pub use entry::{Caller, Entry};
pub use error::{LogError, Result};
pub use logger::{Logger, BASE_CALLER_DEPTH};
pub use severity::Severity;
pub use sink::{LogSink, RecordingSink, WriterSink};
pub use testing::{new_for_testing, StdoutTestLog, TestLog};
pub use value::{SharedError, Value};
