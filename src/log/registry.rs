//! Explicit name → logger map
//!
//! The registry is owned by the caller's process context and passed by
//! reference to whatever needs to create or look up loggers. Creating a logger
//! under a name that is already registered reconfigures that logger in place,
//! so repeated initialization never stacks duplicate sinks.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::destination::{LogDestination, RunIdentity};
use super::logger::Logger;
use super::marker;
use super::record::{Level, LogRecord};
use super::sink::{FileSink, Sink};
use crate::config::RunLogConfig;
use crate::error::{Result, RunLogError};

/// First record written by every file-backed logger
pub const INIT_MESSAGE: &str = "Logger initialized.";

/// Loggers keyed by name
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reconfigure) the logger `name` for run `run_id`.
    ///
    /// Writes to `{folder}/{prefix}_{run_id}.log` in append mode and makes sure
    /// `{folder}/{prefix}_{run_id}_latest_iter.txt` exists without truncating
    /// it. If `name` is already registered its sinks are replaced, and every
    /// existing clone of that logger follows the new configuration.
    ///
    /// Nothing touches the filesystem unless all arguments are valid. The
    /// initialization record is written to the new sinks before they are
    /// attached, so a failed create registers nothing, leaves any previously
    /// registered logger unchanged, and removes the files it created.
    pub fn create(&self, name: &str, run_id: &str, config: &RunLogConfig) -> Result<Logger> {
        let identity = RunIdentity::new(name, run_id)?;
        let destination =
            LogDestination::derive(&config.folder, &config.filename_prefix, identity.run_id())?;

        let mut loggers = self.loggers();

        if let Some((owner, _)) = loggers.iter().find(|(other, logger)| {
            other.as_str() != identity.name() && logger.writes_to(destination.log_file_path())
        }) {
            return Err(RunLogError::DestinationInUse {
                path: destination.log_file_path().to_path_buf(),
                owner: owner.clone(),
            });
        }

        let sinks = open_sinks(&destination, config)?;

        match loggers.get(identity.name()) {
            Some(existing) => {
                existing.replace_sinks(sinks, config.min_level, Some(destination))?;
                Ok(existing.clone())
            }
            None => {
                let logger =
                    Logger::with_sinks(identity.name(), sinks, config.min_level, Some(destination));
                loggers.insert(identity.name().to_string(), logger.clone());
                Ok(logger)
            }
        }
    }

    /// Return the logger `name` configured to discard every record.
    ///
    /// Repeated calls reuse the existing discard sink. A file-backed logger of
    /// the same name is silenced and its file closed.
    pub fn create_null(&self, name: &str) -> Result<Logger> {
        if name.trim().is_empty() {
            return Err(RunLogError::InvalidArgument("name cannot be empty".to_string()));
        }

        let mut loggers = self.loggers();
        match loggers.get(name) {
            Some(existing) if existing.is_null() => Ok(existing.clone()),
            Some(existing) => {
                existing.replace_sinks(vec![Sink::Discard], Level::default(), None)?;
                Ok(existing.clone())
            }
            None => {
                let logger = Logger::null(name);
                loggers.insert(name.to_string(), logger.clone());
                Ok(logger)
            }
        }
    }

    /// Look up a registered logger
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers().get(name).cloned()
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.loggers().contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered loggers
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers().len()
    }

    /// True when no logger is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers().is_empty()
    }

    /// Unregister `name`, flushing and closing its sinks.
    ///
    /// Outstanding clones stay usable but write nowhere. Returns whether a
    /// logger was removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let removed = self.loggers().remove(name);
        match removed {
            Some(logger) => {
                logger.release()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn loggers(&self) -> MutexGuard<'_, HashMap<String, Logger>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Open the sinks for `destination` and write the initialization record.
///
/// Files created by this call are removed again if any step fails.
fn open_sinks(destination: &LogDestination, config: &RunLogConfig) -> Result<Vec<Sink>> {
    fs::create_dir_all(&config.folder).map_err(|e| {
        RunLogError::io(
            format!("Failed to create log directory: {}", config.folder.display()),
            e,
        )
    })?;

    let mut created = Vec::new();
    let result = open_sinks_tracked(destination, config, &mut created);
    if result.is_err() {
        for path in &created {
            // The original failure is what the caller needs to see
            let _ = fs::remove_file(path);
        }
    }
    result
}

fn open_sinks_tracked(
    destination: &LogDestination,
    config: &RunLogConfig,
    created: &mut Vec<PathBuf>,
) -> Result<Vec<Sink>> {
    let log_path = destination.log_file_path();
    let log_existed = log_path.exists();
    let file = FileSink::open(log_path)?;
    if !log_existed {
        created.push(log_path.to_path_buf());
    }

    let marker_path = destination.latest_marker_path();
    let marker_existed = marker_path.exists();
    marker::touch(marker_path)?;
    if !marker_existed {
        created.push(marker_path.to_path_buf());
    }

    let mut sinks = vec![Sink::File(file)];
    if config.enable_console {
        sinks.push(Sink::Console {
            color: config.console_color,
        });
    }

    if Level::Info >= config.min_level {
        let record = LogRecord::now(Level::Info, INIT_MESSAGE);
        for sink in &mut sinks {
            sink.write(&record)?;
        }
    }

    Ok(sinks)
}
