// src/config/loader.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::args::LaunchArg;
use crate::config::model::LaunchConfiguration;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// On-disk shape of a launch file.
///
/// ```toml
/// name = "git"
/// executable = "bin/git"
/// default_arguments = ["status", 3]
/// expected_exit_codes = [0, 1]
/// additional_paths = ["/opt/a", "/opt/b"]
/// unset_environment = ["GIT_DIR"]
///
/// [environment]
/// GIT_PAGER = "cat"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLaunchFile {
    pub name: String,
    #[serde(default)]
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    #[serde(default)]
    pub default_arguments: Vec<toml::Value>,
    #[serde(default)]
    pub combined_output: bool,
    #[serde(default)]
    pub expected_exit_codes: Option<Vec<i32>>,
    #[serde(default)]
    pub additional_paths: Vec<String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub unset_environment: Vec<String>,
}

impl RawLaunchFile {
    /// Build a configuration; relative paths are taken relative to `base_dir`.
    pub fn build(&self, base_dir: Option<&Path>, fs: &dyn FileSystem) -> Result<LaunchConfiguration> {
        let mut cfg = LaunchConfiguration::for_program(self.name.clone())?;

        for (key, value) in self.environment.iter() {
            cfg = cfg.with_environment_variable(key.clone(), value.clone());
        }
        for key in self.unset_environment.iter() {
            cfg = cfg.without_environment_variable(key.clone());
        }
        for dir in self.additional_paths.iter() {
            cfg = cfg.with_additional_path_variable(dir);
        }

        if let Some(exe) = &self.executable {
            cfg = cfg.with_executable_using(rebase(base_dir, exe), fs)?;
        }
        if let Some(dir) = &self.working_directory {
            cfg = cfg.with_working_directory(rebase(base_dir, dir));
        }

        cfg = cfg
            .with_default_arguments(LaunchArg::from_values(&self.default_arguments)?)
            .with_combined_output(self.combined_output);

        if let Some(codes) = &self.expected_exit_codes {
            cfg = cfg.with_expected_exit_codes(codes.iter().copied());
        }

        Ok(cfg)
    }
}

impl TryFrom<RawLaunchFile> for LaunchConfiguration {
    type Error = crate::errors::LaunchError;

    fn try_from(raw: RawLaunchFile) -> std::result::Result<Self, Self::Error> {
        raw.build(None, &RealFileSystem)
    }
}

/// Deserialize a launch file without building a configuration.
pub fn load_from_str(contents: &str) -> Result<RawLaunchFile> {
    let raw: RawLaunchFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Read and deserialize a launch file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawLaunchFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    load_from_str(&contents)
}

/// Read a launch file and turn it into a validated configuration.
///
/// Relative `executable` and `working_directory` entries are resolved
/// against the directory containing the file.
pub fn load_and_build(path: impl AsRef<Path>) -> Result<LaunchConfiguration> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let base_dir = file_root_dir(path);
    debug!(file = %path.display(), base = %base_dir.display(), "loading launch file");
    raw.build(Some(&base_dir), &RealFileSystem)
}

fn file_root_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn rebase(base_dir: Option<&Path>, path: &Path) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
