//! Operator-visible activity log
//!
//! Entries are timestamped, listed newest-first and mirrored to the `log`
//! facade so they also reach `env_logger` output.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

/// Default number of entries kept before the oldest is dropped
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Severity of an operator log entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

/// One line in the operator log
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Append-only log sink shared by every dashboard component
#[derive(Debug)]
pub struct LogSink {
    // Newest entry at the front
    entries: RefCell<VecDeque<LogEntry>>,
    capacity: usize,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl LogSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record a normal operator message
    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!(target: "surveydeck::operator", "{message}");
        self.push(LogLevel::Info, message);
    }

    /// Record a failure the operator should see
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!(target: "surveydeck::operator", "{message}");
        self.push(LogLevel::Warn, message);
    }

    fn push(&self, level: LogLevel, message: String) {
        let mut entries = self.entries.borrow_mut();
        entries.push_front(LogEntry {
            at: Local::now(),
            level,
            message,
        });
        entries.truncate(self.capacity);
    }

    /// Snapshot of all entries, newest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Rendered lines, newest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
