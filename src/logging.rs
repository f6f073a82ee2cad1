// ABOUTME: Injected diagnostic sink for resolution and execution events.
// ABOUTME: TracingSink forwards to tracing; RecordingSink keeps events in memory.

use parking_lot::Mutex;
use std::fmt;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Receives leveled diagnostic messages.
///
/// Implementations must not panic; a sink that cannot deliver a message
/// drops it.
pub trait LogSink {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

/// Forwards events to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "corral", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "corral", "{message}"),
            LogLevel::Error => tracing::error!(target: "corral", "{message}"),
        }
    }
}

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every event in memory, optionally forwarding to tracing as well.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LogEvent>>,
    forward: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record events and also pass them on to tracing.
    pub fn forwarding() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            forward: true,
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.events.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: LogLevel, message: &str) {
        if self.forward {
            TracingSink.log(level, message);
        }
        self.events.lock().push(LogEvent {
            level,
            message: message.to_string(),
        });
    }
}
