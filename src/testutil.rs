//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::path::Path;

use crate::config::RunLogConfig;

/// Config writing `run_*` files into `folder` with every other setting at its default.
#[must_use]
pub fn test_config(folder: &Path) -> RunLogConfig {
    RunLogConfig::new(folder, "run")
}
