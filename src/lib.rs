//! Runlog - run-scoped file logging
//!
//! Binds a logical run to a log file and a latest-iteration marker file, and
//! hands out cheap logger handles that write timestamped, leveled records.
//! A null logger stands in wherever no output is wanted.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod log;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::RunLogConfig;
pub use error::RunLogError;
pub use log::{Level, LogDestination, Logger, LoggerRegistry, ProgressMarker, RunIdentity};
