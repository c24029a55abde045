//! Log records and their line format
//!
//! Every record is rendered as `{timestamp} - {LEVEL} - {message}`, one per
//! line, with a local-time timestamp such as `2026-01-15 10:00:00,042`.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunLogError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
const FIELD_SEPARATOR: &str = " - ";

/// Severity of a log record, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail, filtered out by default
    Debug,
    /// Normal progress messages
    #[default]
    Info,
    /// Something unexpected that the run survived
    Warning,
    /// A failure the run reported
    Error,
    /// A failure the run cannot continue from
    Critical,
}

impl Level {
    /// The tag written into log lines
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single leveled message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local wall-clock time the record was created
    pub timestamp: NaiveDateTime,
    /// Severity
    pub level: Level,
    /// Message text, possibly spanning several lines
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    #[must_use]
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            level,
            message: message.into(),
        }
    }

    /// Render the record as one line, including the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }

    /// The timestamp as it appears in rendered lines
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a single rendered line (without its newline).
    ///
    /// Returns `None` when the line does not start with a timestamp and a
    /// known level tag.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, FIELD_SEPARATOR);
        let timestamp = parts.next()?;
        let level = parts.next()?;
        let message = parts.next()?;

        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
        let level = Level::from_tag(level)?;

        Some(Self {
            timestamp,
            level,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.timestamp_text(),
            self.level,
            self.message
        )
    }
}

/// Read every record from a run log file, in the order written.
///
/// Lines that do not start a new record are continuation lines of a
/// multi-line message and are appended to the preceding record. A missing
/// file yields no records.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<LogRecord>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| RunLogError::io(format!("Failed to read log file: {}", path.display()), e))?;

    let mut records: Vec<LogRecord> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if let Some(record) = LogRecord::parse_line(line) {
            records.push(record);
            continue;
        }

        match records.last_mut() {
            Some(previous) => {
                previous.message.push('\n');
                previous.message.push_str(line);
            }
            None if line.trim().is_empty() => {}
            None => {
                return Err(RunLogError::MalformedRecord {
                    line: line_num + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    Ok(records)
}
