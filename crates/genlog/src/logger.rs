//! The immutable logger front-end.
//!
//! A [`Logger`] accumulates a verbosity level, a dotted name and key/value
//! context. Every `with_*` method and [`Logger::v`] returns a new logger and
//! leaves the receiver untouched; name and value storage is shared
//! read-only and copied on append, so loggers derived from the same parent
//! never see each other's additions.

use std::fmt;
use std::sync::Arc;

use crate::config::{LoggerConfig, DEFAULT_VERBOSITY};
use crate::entry::{Caller, Entry};
use crate::sink::LogSink;
use crate::value::{SharedError, Value};

/// Frames counted for the terminal logging call itself when caller capture
/// is enabled. Reported through [`Entry::caller_depth`].
pub const BASE_CALLER_DEPTH: usize = 1;

/// A structured, leveled logger that forwards entries to a [`LogSink`].
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    level: i32,
    verbosity: i32,
    name_parts: Arc<[String]>,
    name: Arc<str>,
    values: Arc<[Value]>,
    caller: bool,
    call_depth: usize,
}

impl Logger {
    /// Creates a root logger writing to `sink`.
    ///
    /// The root logger has no name, no values, level 0 and a maximum
    /// verbosity of [`DEFAULT_VERBOSITY`], so every level is logged.
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Creates a root logger around an already shared sink.
    pub fn from_shared(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            level: 0,
            verbosity: DEFAULT_VERBOSITY,
            name_parts: Arc::from(Vec::new()),
            name: Arc::from(""),
            values: Arc::from(Vec::new()),
            caller: false,
            call_depth: 0,
        }
    }

    /// Creates a root logger and applies `config` to it.
    pub fn with_config(sink: impl LogSink + 'static, config: &LoggerConfig) -> Self {
        Self::new(sink).configure(config)
    }

    /// Creates a logger whose sink drops every entry.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(|_: &Entry| {})
    }

    /// Applies verbosity, caller capture, call depth and name from `config`.
    #[must_use]
    pub fn configure(&self, config: &LoggerConfig) -> Self {
        let mut log = self
            .with_verbosity(config.verbosity)
            .with_caller(config.caller)
            .with_call_depth(config.call_depth);
        if let Some(ref name) = config.name {
            log = log.with_name(name.as_str());
        }
        log
    }

    /// Returns a logger with the given maximum verbosity. The current level
    /// is unchanged.
    #[must_use]
    pub fn with_verbosity(&self, verbosity: i32) -> Self {
        let mut log = self.clone();
        log.verbosity = verbosity;
        log
    }

    /// Returns a logger whose level is raised by `delta`.
    ///
    /// Higher levels are more verbose; negative deltas make messages more
    /// severe.
    #[must_use]
    pub fn v(&self, delta: i32) -> Self {
        let mut log = self.clone();
        log.level = log.level.saturating_add(delta);
        log
    }

    /// Returns a logger with `segment` appended to its name.
    ///
    /// Segments are stored as given; a segment containing `.` is not split.
    #[must_use]
    pub fn with_name(&self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        let mut log = self.clone();
        if self.name_parts.is_empty() {
            log.name = Arc::from(segment.as_str());
            log.name_parts = Arc::from(vec![segment]);
        } else {
            log.name = Arc::from(format!("{}.{segment}", self.name));
            let mut parts = Vec::with_capacity(self.name_parts.len() + 1);
            parts.extend_from_slice(&self.name_parts);
            parts.push(segment);
            log.name_parts = Arc::from(parts);
        }
        log
    }

    /// Returns a logger with extra key/value context.
    ///
    /// An odd-length list gets a trailing [`Value::Null`] so a key without a
    /// value cannot shift the pairing of values added later.
    #[must_use]
    pub fn with_values(&self, kv: impl IntoIterator<Item = Value>) -> Self {
        let mut added: Vec<Value> = kv.into_iter().collect();
        if added.is_empty() {
            return self.clone();
        }
        if added.len() % 2 == 1 {
            added.push(Value::Null);
        }
        let mut log = self.clone();
        if self.values.is_empty() {
            log.values = Arc::from(added);
        } else {
            let mut values = Vec::with_capacity(self.values.len() + added.len());
            values.extend_from_slice(&self.values);
            values.append(&mut added);
            log.values = Arc::from(values);
        }
        log
    }

    /// Returns a logger that records the source location of each logging
    /// call.
    #[must_use]
    pub fn with_caller(&self, enabled: bool) -> Self {
        let mut log = self.clone();
        log.caller = enabled;
        log
    }

    /// Returns a logger that reports the caller `depth` frames further up the
    /// stack.
    ///
    /// Each wrapper layer around the logger adds its own offset. Wrappers
    /// marked `#[track_caller]` are already transparent and need no offset.
    #[must_use]
    pub fn with_call_depth(&self, depth: usize) -> Self {
        let mut log = self.clone();
        log.call_depth = log.call_depth.saturating_add(depth);
        log
    }

    /// Returns true if messages at the current level are logged.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.level <= self.verbosity
    }

    /// Logs a message with optional key/value pairs.
    ///
    /// Does nothing, and never reaches the sink, when the logger is disabled.
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, kv: impl IntoIterator<Item = Value>) {
        if !self.enabled() {
            return;
        }
        let caller = self.capture_caller();
        self.log_message(None, message.into(), kv, caller);
    }

    /// Logs a message together with an error.
    ///
    /// The error does not change the level; mapping errors to a severity is
    /// left to the sink.
    #[track_caller]
    pub fn error(
        &self,
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
        message: impl Into<String>,
        kv: impl IntoIterator<Item = Value>,
    ) {
        if !self.enabled() {
            return;
        }
        let caller = self.capture_caller();
        self.log_message(Some(Arc::from(err.into())), message.into(), kv, caller);
    }

    /// Logs a message with an error that may be absent.
    ///
    /// `None` logs the message like [`Logger::info`]; `Some` behaves like
    /// [`Logger::error`].
    #[track_caller]
    pub fn error_opt(
        &self,
        err: Option<SharedError>,
        message: impl Into<String>,
        kv: impl IntoIterator<Item = Value>,
    ) {
        if !self.enabled() {
            return;
        }
        let caller = self.capture_caller();
        self.log_message(err, message.into(), kv, caller);
    }

    #[track_caller]
    fn capture_caller(&self) -> Option<Caller> {
        // Location::caller() does not see through closures.
        if self.caller {
            Some(Caller::skipping(self.call_depth))
        } else {
            None
        }
    }

    fn log_message(
        &self,
        error: Option<SharedError>,
        message: String,
        kv: impl IntoIterator<Item = Value>,
        caller: Option<Caller>,
    ) {
        let kv = kv.into_iter();
        let mut fields = Vec::with_capacity(self.values.len() + kv.size_hint().0);
        fields.extend_from_slice(&self.values);
        fields.extend(kv);

        let caller_depth = if caller.is_some() {
            BASE_CALLER_DEPTH.saturating_add(self.call_depth)
        } else {
            0
        };

        self.sink.log(&Entry {
            level: self.level,
            name: Arc::clone(&self.name),
            name_parts: Arc::clone(&self.name_parts),
            message,
            error,
            fields,
            caller,
            caller_depth,
        });
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Returns the maximum verbosity that is logged.
    #[must_use]
    pub const fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Returns the name segments joined with `.`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the individual name segments.
    #[must_use]
    pub fn name_parts(&self) -> &[String] {
        &self.name_parts
    }

    /// Returns the accumulated key/value pairs.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns true if caller capture is enabled.
    #[must_use]
    pub const fn captures_caller(&self) -> bool {
        self.caller
    }

    /// Returns the extra call depth added with [`Logger::with_call_depth`].
    #[must_use]
    pub const fn call_depth(&self) -> usize {
        self.call_depth
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("verbosity", &self.verbosity)
            .field("name", &self.name)
            .field("values", &self.values)
            .field("caller", &self.caller)
            .field("call_depth", &self.call_depth)
            .finish_non_exhaustive()
    }
}
