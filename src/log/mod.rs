//! Run logging
//!
//! This module provides run-scoped loggers writing leveled records to an
//! append-only log file, an optional stderr sink, or nowhere at all, plus the
//! latest-iteration marker file that accompanies each run.

pub mod destination;
pub mod logger;
pub mod marker;
pub mod record;
pub mod registry;
pub mod sink;

pub use destination::{LogDestination, RunIdentity};
pub use logger::Logger;
pub use marker::ProgressMarker;
pub use record::{read_records, Level, LogRecord};
pub use registry::LoggerRegistry;
pub use sink::SinkKind;
