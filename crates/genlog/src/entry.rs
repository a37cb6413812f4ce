//! Finished log entries.
//!
//! An [`Entry`] is built once per enabled logging call, handed to the sink,
//! and dropped. Its [`Display`](std::fmt::Display) output is meant for
//! humans; the format may change, so sinks that need to parse their own
//! output should render from the fields directly or use [`Entry::to_json`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::formatter::{fields_map, flatten, quote};
use crate::value::{SharedError, Value};

/// Source location of the code that made a logging call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Caller {
    /// Source file path. Compiler-relative when taken from
    /// `#[track_caller]`, as recorded in debug info when found by walking
    /// the stack.
    pub file: Cow<'static, str>,
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1; 0 when unknown.
    pub column: u32,
}

impl Caller {
    /// Captures the location of the nearest caller not marked
    /// `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// Captures the caller `skip` frames above the nearest caller not marked
    /// `#[track_caller]`.
    ///
    /// A `skip` of zero is the same as [`Caller::here`]. Otherwise the stack
    /// is walked and resolved through debug info; when that frame cannot be
    /// resolved the `#[track_caller]` location is returned instead.
    #[must_use]
    #[track_caller]
    pub fn skipping(skip: usize) -> Self {
        let location = Location::caller();
        if skip == 0 {
            return Self::from_location(location);
        }
        walk_from(location, skip).unwrap_or_else(|| {
            debug!(skip, file = location.file(), "caller frame not resolved");
            Self::from_location(location)
        })
    }

    fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Finds the stack frame calling from `anchor`, then moves `skip` frames up.
///
/// Inlined calls resolve to one symbol each, so they count as frames.
fn walk_from(anchor: &Location<'static>, skip: usize) -> Option<Caller> {
    let mut seen: Option<usize> = None;
    let mut found = None;

    backtrace::trace(|frame| {
        let mut symbols = Vec::new();
        backtrace::resolve_frame(frame, |symbol| {
            let location = symbol
                .filename()
                .zip(symbol.lineno())
                .map(|(file, line)| Caller {
                    file: Cow::Owned(file.display().to_string()),
                    line,
                    column: symbol.colno().unwrap_or(0),
                });
            symbols.push(location);
        });
        if symbols.is_empty() {
            symbols.push(None);
        }

        for symbol in symbols {
            match seen {
                None => {
                    let at_anchor = symbol.as_ref().is_some_and(|c| {
                        c.line == anchor.line()
                            && Path::new(c.file.as_ref()).ends_with(anchor.file())
                    });
                    if at_anchor {
                        seen = Some(0);
                    }
                }
                Some(n) => {
                    let n = n + 1;
                    seen = Some(n);
                    if n == skip {
                        found = symbol;
                        return false;
                    }
                }
            }
        }
        true
    });

    found
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A log entry as received by a [`LogSink`](crate::LogSink).
#[derive(Debug, Clone)]
pub struct Entry {
    /// Verbosity level the entry was logged at.
    pub level: i32,
    /// Name parts joined with `.`.
    pub name: Arc<str>,
    /// Individual name segments.
    pub name_parts: Arc<[String]>,
    /// Message as passed to the logging call.
    pub message: String,
    /// Error passed to [`Logger::error`](crate::Logger::error), if any.
    pub error: Option<SharedError>,
    /// Alternating key/value pairs: logger values first, call-site values
    /// second.
    pub fields: Vec<Value>,
    /// Location of the logging call, when caller capture is enabled.
    pub caller: Option<Caller>,
    /// Frames between the logging call and the reported caller, when caller
    /// capture is enabled; zero otherwise.
    pub caller_depth: usize,
}

impl Entry {
    /// Converts the fields to a map. Later duplicate keys win.
    #[must_use]
    pub fn fields_map(&self) -> BTreeMap<String, Value> {
        fields_map(&self.fields)
    }

    /// Converts the whole entry to a JSON object.
    ///
    /// Fields are nested under `fields` so they can never shadow the entry's
    /// own keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("level".to_string(), self.level.into());
        object.insert("name".to_string(), self.name.as_ref().into());
        object.insert("msg".to_string(), self.message.clone().into());
        if let Some(ref err) = self.error {
            object.insert("error".to_string(), err.to_string().into());
        }
        if let Some(ref caller) = self.caller {
            object.insert(
                "caller".to_string(),
                serde_json::json!({ "file": caller.file, "line": caller.line }),
            );
        }
        if !self.fields.is_empty() {
            let fields = serde_json::to_value(self.fields_map())
                .unwrap_or_else(|e| serde_json::Value::String(e.to_string()));
            object.insert("fields".to_string(), fields);
        }
        serde_json::Value::Object(object)
    }
}

impl fmt::Display for Entry {
    /// Renders `[<level>] <name> "<message>" error="<err>" <key=value ...>`,
    /// with fields sorted by key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.level, self.name, quote(&self.message))?;
        if let Some(ref err) = self.error {
            let error_fields = [Value::from("error"), Value::from(err.to_string())];
            write!(f, " {}", flatten(&error_fields))?;
        }
        if !self.fields.is_empty() {
            write!(f, " {}", flatten(&self.fields))?;
        }
        Ok(())
    }
}
