//! Output sinks that receive rendered records
//!
//! Console output goes to stderr so stdout remains clean for piping.

use std::fs::{File, OpenOptions};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};

use super::record::{Level, LogRecord};
use crate::error::{Result, RunLogError};

/// The kind of a sink attached to a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Append-only run log file
    File,
    /// Standard error
    Console,
    /// Discards every record
    Discard,
}

/// A destination for rendered records
#[derive(Debug)]
pub(crate) enum Sink {
    File(FileSink),
    Console { color: bool },
    Discard,
}

impl Sink {
    pub(crate) const fn kind(&self) -> SinkKind {
        match self {
            Self::File(_) => SinkKind::File,
            Self::Console { .. } => SinkKind::Console,
            Self::Discard => SinkKind::Discard,
        }
    }

    /// The line this sink emits for `record`, including the newline.
    ///
    /// Only a colored console differs from the file line, and only in the level tag.
    pub(crate) fn render(&self, record: &LogRecord) -> String {
        match self {
            Self::Console { color: true } => format!(
                "{} - {} - {}\n",
                record.timestamp_text(),
                paint_level(record.level),
                record.message
            ),
            Self::File(_) | Self::Console { color: false } | Self::Discard => record.to_line(),
        }
    }

    /// Write one record. The whole line goes out in a single `write_all`.
    pub(crate) fn write(&mut self, record: &LogRecord) -> Result<()> {
        match self {
            Self::File(file) => file.write(record),
            Self::Console { .. } => io::stderr()
                .lock()
                .write_all(self.render(record).as_bytes())
                .map_err(|e| RunLogError::io("Failed to write to console", e)),
            Self::Discard => Ok(()),
        }
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        match self {
            Self::File(file) => file.flush(),
            Self::Console { .. } => io::stderr()
                .flush()
                .map_err(|e| RunLogError::io("Failed to flush console", e)),
            Self::Discard => Ok(()),
        }
    }

    pub(crate) fn file_path(&self) -> Option<&Path> {
        match self {
            Self::File(file) => Some(&file.path),
            Self::Console { .. } | Self::Discard => None,
        }
    }
}

/// Append-mode handle on a run log file
#[derive(Debug)]
pub(crate) struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed. Never truncates.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                RunLogError::io(format!("Failed to open log file: {}", path.display()), e)
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        self.file
            .write_all(record.to_line().as_bytes())
            .map_err(|e| {
                RunLogError::io(
                    format!("Failed to write to log file: {}", self.path.display()),
                    e,
                )
            })
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush().map_err(|e| {
            RunLogError::io(
                format!("Failed to flush log file: {}", self.path.display()),
                e,
            )
        })
    }
}

fn paint_level(level: Level) -> ColoredString {
    match level {
        Level::Debug => level.as_str().dimmed(),
        Level::Info => level.as_str().green(),
        Level::Warning => level.as_str().yellow(),
        Level::Error => level.as_str().red(),
        Level::Critical => level.as_str().red().bold(),
    }
}
