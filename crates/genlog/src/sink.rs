//! Sinks that receive finished entries.
//!
//! This module provides the [`LogSink`] trait, implemented for every
//! `Fn(&Entry)` closure, plus two ready-made sinks:
//! - [`WriterSink`] — renders each entry as one line on a writer
//! - [`RecordingSink`] — keeps entries in memory for inspection

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::entry::Entry;

/// Receiver for finished log entries.
///
/// The sink is called synchronously on the logging thread. Loggers derived
/// from the same root share one sink, so implementations must do their own
/// locking if they touch shared state.
pub trait LogSink: Send + Sync {
    /// Handles one entry.
    fn log(&self, entry: &Entry);
}

impl<F> LogSink for F
where
    F: Fn(&Entry) + Send + Sync,
{
    fn log(&self, entry: &Entry) {
        self(entry);
    }
}

/// Writes every entry as a single rendered line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    prefix: String,
}

impl WriterSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> WriterSink<W> {
    /// Creates a sink writing to the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            prefix: String::new(),
        }
    }

    /// Sets a prefix written before every line.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn log(&self, entry: &Entry) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}{entry}", self.prefix) {
            warn!(error = %e, "failed to write log entry");
        }
    }
}

/// Keeps every received entry in memory.
///
/// Clones share the same storage, so one clone can be handed to a logger
/// while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().clone()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<Entry> {
        self.entries.lock().last().cloned()
    }

    /// Returns every entry rendered as a line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl LogSink for RecordingSink {
    fn log(&self, entry: &Entry) {
        self.entries.lock().push(entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;
    use crate::Logger;

    /// Writer that fails every write.
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closure_is_a_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_sink = Arc::clone(&seen);
        let log = Logger::new(move |e: &Entry| seen_by_sink.lock().push(e.message.clone()));

        log.info("one", kv![]);
        log.info("two", kv![]);

        assert_eq!(*seen.lock(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn writer_sink_writes_lines() {
        let sink = Arc::new(WriterSink::new(Vec::new()).with_prefix("LOG: "));
        let log = Logger::from_shared(sink.clone());

        log.info("hello world at info level", kv![]);
        log.with_name("some")
            .with_name("component")
            .with_values(kv!["foo", 42])
            .v(1)
            .info("event", kv!["extra", "someval1"]);
        drop(log);

        let output = Arc::try_unwrap(sink)
            .ok()
            .map(WriterSink::into_inner)
            .map(String::from_utf8);
        assert_eq!(
            output,
            Some(Ok("LOG: [0]  \"hello world at info level\"\n\
                     LOG: [1] some.component \"event\" extra=\"someval1\" foo=42\n"
                .to_string()))
        );
    }

    #[test]
    fn writer_sink_survives_write_errors() {
        let log = Logger::new(WriterSink::new(BrokenWriter));
        log.info("dropped", kv!["a", 1]);
    }

    #[test]
    fn recording_sink_shares_storage() {
        let sink = RecordingSink::new();
        let log = Logger::new(sink.clone());
        assert!(sink.is_empty());

        log.info("first", kv![]);
        log.info("second", kv!["a", 1]);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last().map(|e| e.message), Some("second".to_string()));
        assert_eq!(
            sink.lines(),
            vec![
                "[0]  \"first\"".to_string(),
                "[0]  \"second\" a=1".to_string()
            ]
        );

        sink.clear();
        assert!(sink.is_empty());
        assert!(sink.last().is_none());
    }
}
