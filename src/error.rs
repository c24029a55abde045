//! Error type for logger creation, writing, and reading back run logs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the run logger
#[derive(Debug, Error)]
pub enum RunLogError {
    /// A required argument was empty or otherwise unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem failure while creating, writing, flushing, or reading
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted, including the path involved
        context: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Another registered logger already writes to this log file
    #[error("log file {} is already owned by logger '{owner}'", .path.display())]
    DestinationInUse {
        /// The contested log file path
        path: PathBuf,
        /// Name of the logger holding the writer
        owner: String,
    },

    /// A line in a log file is not a `timestamp - LEVEL - message` record
    #[error("malformed log record on line {line}: {content:?}")]
    MalformedRecord {
        /// 1-indexed line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// The progress marker holds something other than an iteration number
    #[error("malformed progress marker {}: {content:?}", .path.display())]
    MalformedMarker {
        /// Marker file path
        path: PathBuf,
        /// The trimmed file content
        content: String,
    },
}

impl RunLogError {
    /// Wrap an I/O error with a description of the failed operation.
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RunLogError>;
