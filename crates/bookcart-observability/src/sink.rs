//! Log output destinations.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{LogEntry, LogLevel};

/// Destination for log entries.
///
/// `rendered` is the entry already formatted according to the logger's
/// [`LogFormat`](crate::LogFormat).
pub trait LogSink: fmt::Debug {
    fn write(&self, entry: &LogEntry, rendered: &str);
}

/// Writes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, _entry: &LogEntry, rendered: &str) {
        eprintln!("{}", rendered);
    }
}

/// Forwards entries as `tracing` events, so a host subscriber decides output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let component = entry.component.as_str();
        match entry.level {
            LogLevel::Trace => tracing::trace!(component, "{}", rendered),
            LogLevel::Debug => tracing::debug!(component, "{}", rendered),
            LogLevel::Info => tracing::info!(component, "{}", rendered),
            LogLevel::Warn => tracing::warn!(component, "{}", rendered),
            LogLevel::Error => tracing::error!(component, "{}", rendered),
        }
    }
}

/// Keeps entries in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Entries at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Check whether any entry's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.message.contains(needle))
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _rendered: &str) {
        self.entries.borrow_mut().push(entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::StructuredLogger;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_sink_emits_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        let logger = StructuredLogger::new("cart").with_sink(TracingSink);
        tracing::subscriber::with_default(subscriber, || {
            logger.warn("cart parse error");
            logger.debug("below the logger's level");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("cart parse error"));
        assert!(output.contains("component="));
        assert!(!output.contains("below the logger's level"));
    }

    #[test]
    fn test_memory_sink_filters_by_level() {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("cart")
            .with_min_level(LogLevel::Trace)
            .with_sink(sink.clone());

        logger.debug("a");
        logger.error("b");

        assert_eq!(sink.at_level(LogLevel::Error).len(), 1);
        sink.clear();
        assert!(sink.entries().is_empty());
    }
}
