//! The logger handle
//!
//! A `Logger` is a cheap, clonable handle. All clones share one set of sinks
//! behind a single mutex, so a record is written to every sink before any other
//! thread can write, and lines never interleave.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::destination::LogDestination;
use super::marker::ProgressMarker;
use super::record::{Level, LogRecord};
use super::sink::{Sink, SinkKind};
use crate::error::Result;

/// Name given to loggers created by `Logger::default()`
pub const DEFAULT_NULL_NAME: &str = "null";

/// Handle for writing leveled records to a run's sinks
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    name: String,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    sinks: Vec<Sink>,
    min_level: Level,
    destination: Option<LogDestination>,
}

impl Logger {
    /// Create an unregistered logger that discards every record.
    ///
    /// Useful as a default wherever a logger is optional, so call sites never
    /// need to check for its absence.
    #[must_use]
    pub fn null(name: &str) -> Self {
        Self::with_sinks(name, vec![Sink::Discard], Level::default(), None)
    }

    pub(crate) fn with_sinks(
        name: &str,
        sinks: Vec<Sink>,
        min_level: Level,
        destination: Option<LogDestination>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                state: Mutex::new(State {
                    sinks,
                    min_level,
                    destination,
                }),
            }),
        }
    }

    /// Logger name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Files this logger writes to, if it is file-backed
    #[must_use]
    pub fn destination(&self) -> Option<LogDestination> {
        self.state().destination.clone()
    }

    /// Records below this level are dropped
    #[must_use]
    pub fn min_level(&self) -> Level {
        self.state().min_level
    }

    /// Kinds of the currently attached sinks, in attachment order
    #[must_use]
    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.state().sinks.iter().map(Sink::kind).collect()
    }

    /// True when the only sinks attached discard their input
    #[must_use]
    pub fn is_null(&self) -> bool {
        let state = self.state();
        !state.sinks.is_empty() && state.sinks.iter().all(|s| s.kind() == SinkKind::Discard)
    }

    /// Collaborator for the run's latest-iteration marker, if file-backed
    #[must_use]
    pub fn progress_marker(&self) -> Option<ProgressMarker> {
        self.state()
            .destination
            .as_ref()
            .map(|d| ProgressMarker::new(d.latest_marker_path()))
    }

    /// Write `message` at `level` to every sink.
    pub fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        let mut state = self.state();
        if level < state.min_level {
            return Ok(());
        }

        let record = LogRecord::now(level, message);
        for sink in &mut state.sinks {
            sink.write(&record)?;
        }
        Ok(())
    }

    /// Write at `DEBUG`
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    /// Write at `INFO`
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Info, message)
    }

    /// Write at `WARNING`
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Warning, message)
    }

    /// Write at `ERROR`
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Error, message)
    }

    /// Write at `CRITICAL`
    pub fn critical(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Critical, message)
    }

    /// Flush every sink.
    pub fn flush(&self) -> Result<()> {
        for sink in &mut self.state().sinks {
            sink.flush()?;
        }
        Ok(())
    }

    /// Swap in a new sink set. The old sinks are flushed, then closed.
    ///
    /// A failed flush leaves the logger untouched.
    pub(crate) fn replace_sinks(
        &self,
        sinks: Vec<Sink>,
        min_level: Level,
        destination: Option<LogDestination>,
    ) -> Result<()> {
        let mut state = self.state();
        state.sinks.iter_mut().try_for_each(Sink::flush)?;
        state.min_level = min_level;
        state.destination = destination;
        let old = std::mem::replace(&mut state.sinks, sinks);
        drop(state);
        drop(old);
        Ok(())
    }

    /// Flush and drop all sinks. Further records go nowhere.
    pub(crate) fn release(&self) -> Result<()> {
        self.replace_sinks(Vec::new(), self.min_level(), None)
    }

    pub(crate) fn writes_to(&self, path: &Path) -> bool {
        self.state()
            .sinks
            .iter()
            .any(|s| s.file_path() == Some(path))
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::null(DEFAULT_NULL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::sink::FileSink;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn file_logger(dir: &Path, min_level: Level) -> Logger {
        let path = dir.join("run.log");
        let sink = Sink::File(FileSink::open(&path).unwrap());
        Logger::with_sinks("test", vec![sink], min_level, None)
    }

    #[test]
    fn test_null_logger_discards_without_error() {
        let logger = Logger::null("quiet");
        logger.info("x").unwrap();
        logger.critical("y").unwrap();
        logger.flush().unwrap();
        assert!(logger.is_null());
        assert!(logger.destination().is_none());
        assert!(logger.progress_marker().is_none());
    }

    #[test]
    fn test_default_logger_is_null() {
        let logger = Logger::default();
        assert_eq!(logger.name(), DEFAULT_NULL_NAME);
        assert_eq!(logger.sink_kinds(), vec![SinkKind::Discard]);
    }

    #[test]
    fn test_records_below_min_level_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let logger = file_logger(tmp.path(), Level::Warning);

        logger.debug("hidden").unwrap();
        logger.info("hidden").unwrap();
        logger.warning("shown").unwrap();
        logger.error("shown").unwrap();

        let content = fs::read_to_string(tmp.path().join("run.log")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("hidden"));
    }

    #[test]
    fn test_clones_share_sinks() {
        let tmp = TempDir::new().unwrap();
        let logger = file_logger(tmp.path(), Level::Info);
        let clone = logger.clone();

        logger.release().unwrap();
        clone.info("after release").unwrap();

        assert!(clone.sink_kinds().is_empty());
        let content = fs::read_to_string(tmp.path().join("run.log")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_concurrent_writes_never_interleave() {
        let tmp = TempDir::new().unwrap();
        let logger = file_logger(tmp.path(), Level::Info);
        let payload = "x".repeat(4096);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = logger.clone();
                let payload = payload.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(format!("t{t} i{i} {payload}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(tmp.path().join("run.log")).unwrap();
        assert_eq!(content.lines().count(), 400);
        for line in content.lines() {
            assert!(line.contains(" - INFO - t"), "interleaved line: {line}");
            assert!(line.ends_with(&payload));
        }
    }
}
