//! Run identity and the files a run writes to

use std::path::{Component, Path, PathBuf};

use chrono::Local;

use crate::error::{Result, RunLogError};

const RUN_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Identifies one logger bound to one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    name: String,
    run_id: String,
}

impl RunIdentity {
    /// Create an identity from a logger name and a caller-chosen run id.
    ///
    /// Both must be non-empty. Uniqueness of `run_id` is up to the caller.
    pub fn new(name: impl Into<String>, run_id: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let run_id = run_id.into();
        require_non_empty("name", &name)?;
        require_non_empty("run_id", &run_id)?;
        Ok(Self { name, run_id })
    }

    /// Create an identity whose run id is the current local time,
    /// e.g. `20260115_100000`.
    pub fn timestamped(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Local::now().format(RUN_ID_FORMAT).to_string())
    }

    /// Logger name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run id
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

/// The log file and progress marker file belonging to one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDestination {
    log_file_path: PathBuf,
    latest_marker_path: PathBuf,
}

impl LogDestination {
    /// Derive the destination for `run_id` under `folder`.
    ///
    /// Produces `{folder}/{prefix}_{run_id}.log` and
    /// `{folder}/{prefix}_{run_id}_latest_iter.txt`. `.` components of
    /// `folder` are dropped, so `./logs` and `logs` derive the same paths.
    pub fn derive<P: AsRef<Path>>(folder: P, filename_prefix: &str, run_id: &str) -> Result<Self> {
        require_non_empty("filename_prefix", filename_prefix)?;
        require_non_empty("run_id", run_id)?;

        let folder: PathBuf = folder
            .as_ref()
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        let stem = format!("{filename_prefix}_{run_id}");

        Ok(Self {
            log_file_path: folder.join(format!("{stem}.log")),
            latest_marker_path: folder.join(format!("{stem}_latest_iter.txt")),
        })
    }

    /// Path of the append-only log file
    #[must_use]
    pub fn log_file_path(&self) -> &Path {
        &self.log_file_path
    }

    /// Path of the latest-iteration marker file
    #[must_use]
    pub fn latest_marker_path(&self) -> &Path {
        &self.latest_marker_path
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RunLogError::InvalidArgument(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_paths_follow_prefix_and_run_id() {
        let dest = LogDestination::derive("logs/pyvrp", "run", "20260115_100000").unwrap();
        assert_eq!(
            dest.log_file_path(),
            Path::new("logs/pyvrp/run_20260115_100000.log")
        );
        assert_eq!(
            dest.latest_marker_path(),
            Path::new("logs/pyvrp/run_20260115_100000_latest_iter.txt")
        );
    }

    #[test]
    fn test_distinct_run_ids_give_distinct_destinations() {
        let a = LogDestination::derive("logs", "run", "a").unwrap();
        let b = LogDestination::derive("logs", "run", "b").unwrap();
        assert_ne!(a.log_file_path(), b.log_file_path());
        assert_ne!(a.latest_marker_path(), b.latest_marker_path());
    }

    #[test]
    fn test_current_dir_components_are_dropped() {
        let plain = LogDestination::derive("logs/pyvrp", "run", "1").unwrap();
        let dotted = LogDestination::derive("./logs/./pyvrp", "run", "1").unwrap();
        assert_eq!(plain, dotted);

        let here = LogDestination::derive(".", "run", "1").unwrap();
        assert_eq!(here.log_file_path(), Path::new("run_1.log"));
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        assert!(matches!(
            RunIdentity::new("solver", ""),
            Err(RunLogError::InvalidArgument(_))
        ));
        assert!(matches!(
            RunIdentity::new("  ", "1"),
            Err(RunLogError::InvalidArgument(_))
        ));
        assert!(matches!(
            LogDestination::derive("logs", "", "1"),
            Err(RunLogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_timestamped_run_id_shape() {
        let identity = RunIdentity::timestamped("solver").unwrap();
        assert_eq!(identity.name(), "solver");
        assert_eq!(identity.run_id().len(), "20260115_100000".len());
        assert_eq!(identity.run_id().as_bytes()[8], b'_');
    }
}
