use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Append-only record of what happened during a session.
///
/// Every entry is mirrored to `tracing` at debug level so `--verbose` /
/// `RUST_LOG` show the same trail on stderr. An optional echo hook lets the front end display
/// entries as they are appended.
#[derive(Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
    echo: Option<fn(&ActivityEntry)>,
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog")
            .field("entries", &self.entries)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo(echo: fn(&ActivityEntry)) -> Self {
        Self {
            entries: Vec::new(),
            echo: Some(echo),
        }
    }

    pub fn set_echo(&mut self, echo: fn(&ActivityEntry)) {
        self.echo = Some(echo);
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) -> &ActivityEntry {
        let message = message.into();
        tracing::debug!(?level, "{}", message);

        let entry = ActivityEntry {
            timestamp: Local::now(),
            level,
            message,
        };
        if let Some(echo) = self.echo {
            echo(&entry);
        }
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Entries appended at or after `start`.
    pub fn since(&self, start: usize) -> &[ActivityEntry] {
        &self.entries[start.min(self.entries.len())..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}
