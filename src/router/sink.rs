//! Logging sinks handed to services for delivery progress output.
//!
//! The router keeps one shared sink and binds it to every located service.
//! Services never hold on to a sink; they receive a [`ServiceLogger`] for the
//! duration of a single send.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;

/// Destination for progress and diagnostic lines emitted by services
pub trait LogSink: Send + Sync {
    /// Records one line emitted by the service registered under `scheme`
    fn log(&self, level: Level, scheme: &str, message: &str);
}

/// Shared handle to a logging sink
pub type SharedSink = Arc<dyn LogSink>;

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn log(&self, _level: Level, _scheme: &str, _message: &str) {}
}

/// Sink that forwards service output to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, scheme: &str, message: &str) {
        match level {
            Level::ERROR => tracing::error!(scheme, "{}", message),
            Level::WARN => tracing::warn!(scheme, "{}", message),
            Level::INFO => tracing::info!(scheme, "{}", message),
            Level::DEBUG => tracing::debug!(scheme, "{}", message),
            Level::TRACE => tracing::trace!(scheme, "{}", message),
        }
    }
}

/// One line captured by a [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub scheme: String,
    pub message: String,
}

/// Sink that keeps every line in memory
///
/// Useful for callers that want to report service output themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured messages only
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, scheme: &str, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                scheme: scheme.to_string(),
                message: message.to_string(),
            });
    }
}

/// Per-call logger passed to a service's `send`
#[derive(Clone)]
pub struct ServiceLogger {
    sink: SharedSink,
    scheme: String,
}

impl ServiceLogger {
    pub fn new(sink: SharedSink, scheme: impl Into<String>) -> Self {
        Self {
            sink,
            scheme: scheme.into(),
        }
    }

    /// Logger that discards every line
    pub fn discard(scheme: impl Into<String>) -> Self {
        Self::new(Arc::new(DiscardSink), scheme)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        self.sink.log(level, &self.scheme, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::WARN, message);
    }
}

impl fmt::Debug for ServiceLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLogger")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}
