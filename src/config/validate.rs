// src/config/validate.rs

use std::path::Path;

use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;

/// Check that an explicit executable override can be launched.
///
/// Runs once, when the override is configured; launches trust the result.
pub fn validate_executable(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if !fs.exists(path) {
        return Err(LaunchError::ConfigError(format!(
            "executable '{}' does not exist",
            path.display()
        )));
    }
    if !fs.is_executable(path) {
        return Err(LaunchError::ConfigError(format!(
            "executable '{}' is not an executable file",
            path.display()
        )));
    }
    Ok(())
}
