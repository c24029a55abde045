//! Latest-iteration marker file
//!
//! Manages `{prefix}_{run_id}_latest_iter.txt`, a small file reflecting how far
//! a run has progressed. External tools can poll it without parsing the log.
//! The logger only guarantees the file exists; `ProgressMarker` is the stock
//! collaborator that stores a decimal iteration number in it.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Result, RunLogError};

/// Create the marker file if missing. Existing content is left untouched.
pub(crate) fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| {
            RunLogError::io(
                format!("Failed to create marker file: {}", path.display()),
                e,
            )
        })
}

/// Reads and writes the latest iteration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressMarker {
    path: PathBuf,
}

impl ProgressMarker {
    /// Target an existing or future marker file.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the marker file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace the marker content with `iteration` (write to temp, then rename).
    pub fn write_iteration(&self, iteration: u64) -> Result<()> {
        let tmp_path = self.path.with_extension("txt.tmp");
        fs::write(&tmp_path, iteration.to_string()).map_err(|e| {
            RunLogError::io(format!("Failed to write temp file: {}", tmp_path.display()), e)
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            RunLogError::io(
                format!(
                    "Failed to rename {} -> {}",
                    tmp_path.display(),
                    self.path.display()
                ),
                e,
            )
        })
    }

    /// Read the latest iteration, or `None` if the file is missing or empty.
    pub fn read_iteration(&self) -> Result<Option<u64>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| RunLogError::io(format!("Failed to read {}", self.path.display()), e))?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        content
            .parse()
            .map(Some)
            .map_err(|_| RunLogError::MalformedMarker {
                path: self.path.clone(),
                content: content.to_string(),
            })
    }

    /// Empty the marker file, keeping it in place.
    pub fn reset(&self) -> Result<()> {
        fs::write(&self.path, "")
            .map_err(|e| RunLogError::io(format!("Failed to reset {}", self.path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_touch_creates_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run_1_latest_iter.txt");

        touch(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_touch_keeps_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run_1_latest_iter.txt");
        fs::write(&path, "41").unwrap();

        touch(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "41");
    }

    #[test]
    fn test_read_iteration_none_when_missing_or_empty() {
        let tmp = TempDir::new().unwrap();
        let marker = ProgressMarker::new(tmp.path().join("run_1_latest_iter.txt"));
        assert_eq!(marker.read_iteration().unwrap(), None);

        touch(marker.path()).unwrap();
        assert_eq!(marker.read_iteration().unwrap(), None);
    }

    #[test]
    fn test_write_iteration_overwrites_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let marker = ProgressMarker::new(tmp.path().join("run_1_latest_iter.txt"));

        marker.write_iteration(3).unwrap();
        marker.write_iteration(250).unwrap();

        assert_eq!(marker.read_iteration().unwrap(), Some(250));
        assert!(!tmp.path().join("run_1_latest_iter.txt.tmp").exists());
    }

    #[test]
    fn test_read_iteration_tolerates_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let marker = ProgressMarker::new(tmp.path().join("m.txt"));
        fs::write(marker.path(), "17\n").unwrap();

        assert_eq!(marker.read_iteration().unwrap(), Some(17));
    }

    #[test]
    fn test_read_iteration_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let marker = ProgressMarker::new(tmp.path().join("m.txt"));
        fs::write(marker.path(), "iteration seven").unwrap();

        let err = marker.read_iteration().unwrap_err();
        assert!(matches!(err, RunLogError::MalformedMarker { .. }));
    }

    #[test]
    fn test_reset_empties_marker() {
        let tmp = TempDir::new().unwrap();
        let marker = ProgressMarker::new(tmp.path().join("m.txt"));
        marker.write_iteration(9).unwrap();

        marker.reset().unwrap();

        assert!(marker.path().exists());
        assert_eq!(marker.read_iteration().unwrap(), None);
    }
}
