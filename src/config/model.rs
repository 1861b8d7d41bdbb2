// src/config/model.rs

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::args::LaunchArg;
use crate::config::validate::validate_executable;
use crate::errors::{LaunchError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::platform::Platform;

/// Immutable description of how to find and invoke one program.
///
/// Every `with_*` / `without_*` method leaves `self` untouched and returns a
/// new configuration, so a single value can be shared between threads and
/// reused for any number of launches.
///
/// ```no_run
/// use proclaunch::LaunchConfiguration;
///
/// let git = LaunchConfiguration::for_program("git")?
///     .with_environment_variable("GIT_PAGER", "cat")
///     .with_default_arguments(["--no-optional-locks"]);
/// let status = git.run(["status", "--short"])?;
/// for line in status.stdout_lines()? {
///     println!("{}", line?);
/// }
/// # Ok::<(), proclaunch::errors::LaunchError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfiguration {
    name: String,
    executable: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    environment: BTreeMap<String, Option<String>>,
    default_arguments: Vec<LaunchArg>,
    combined_output: bool,
    expected_exit_codes: BTreeSet<i32>,
    platform: Platform,
}

impl LaunchConfiguration {
    /// Start a configuration for `name` on the current host.
    pub fn for_program(name: impl Into<String>) -> Result<Self> {
        Self::for_program_on(name, Platform::current())
    }

    /// Start a configuration that follows the rules of `platform`.
    ///
    /// Useful for planning launches for another host shape; spawning still
    /// happens on the current host.
    pub fn for_program_on(name: impl Into<String>, platform: Platform) -> Result<Self> {
        let name = name.into();
        if !platform.supports_process_spawning() {
            return Err(LaunchError::UnsupportedEnvironment(name));
        }

        Ok(Self {
            name,
            executable: None,
            working_directory: None,
            environment: BTreeMap::new(),
            default_arguments: Vec::new(),
            combined_output: false,
            expected_exit_codes: BTreeSet::from([0]),
            platform,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Environment overlay; `None` values mark variables to remove.
    pub fn environment(&self) -> &BTreeMap<String, Option<String>> {
        &self.environment
    }

    pub fn default_arguments(&self) -> &[LaunchArg] {
        &self.default_arguments
    }

    pub fn combined_output(&self) -> bool {
        self.combined_output
    }

    pub fn expected_exit_codes(&self) -> &BTreeSet<i32> {
        &self.expected_exit_codes
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn with_working_directory(&self, dir: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.working_directory = Some(dir.into());
        next
    }

    /// Run in the caller's working directory.
    pub fn with_inherited_working_directory(&self) -> Self {
        let mut next = self.clone();
        next.working_directory = None;
        next
    }

    /// Set `key` to `value` in the child's environment.
    pub fn with_environment_variable(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut next = self.clone();
        next.set_overlay(key.into(), Some(value.into()));
        next
    }

    /// Remove `key` from the child's environment, even if the parent has it.
    pub fn without_environment_variable(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set_overlay(key.into(), None);
        next
    }

    /// Put `dir` in front of the executable search path.
    ///
    /// The first call seeds the overlay from the inherited search path; each
    /// later call prepends again, so the most recent directory is searched
    /// first.
    ///
    /// Overlay values are UTF-8. Inherited search-path entries that are not
    /// are left out of the seeded value, with a warning.
    pub fn with_additional_path_variable(&self, dir: impl AsRef<str>) -> Self {
        let key = self.platform.path_variable();
        let current = match self.overlay_entry(key) {
            Some((_, Some(value))) => value.clone(),
            Some((_, None)) => String::new(),
            None => std::env::var_os(key)
                .map(|v| inherited_search_path(v, self.platform))
                .unwrap_or_default(),
        };
        let prepended = prepend_path_entry(dir.as_ref(), &current, self.platform);
        debug!(program = %self.name, path = %prepended, "search path extended");

        let mut next = self.clone();
        next.set_overlay(key.to_string(), Some(prepended));
        next
    }

    /// Launch `path` instead of searching for the program by name.
    ///
    /// The file must exist and be executable now; it is not re-checked at
    /// launch time.
    pub fn with_executable(&self, path: impl Into<PathBuf>) -> Result<Self> {
        self.with_executable_using(path, &RealFileSystem)
    }

    /// Like [`with_executable`](Self::with_executable), probing through `fs`.
    pub fn with_executable_using(
        &self,
        path: impl Into<PathBuf>,
        fs: &dyn FileSystem,
    ) -> Result<Self> {
        let path = path.into();
        validate_executable(fs, &path)?;

        let mut next = self.clone();
        next.executable = Some(path);
        Ok(next)
    }

    /// Go back to searching the program by name.
    pub fn without_executable(&self) -> Self {
        let mut next = self.clone();
        next.executable = None;
        next
    }

    /// Replace the arguments prepended to every launch.
    pub fn with_default_arguments<I, A>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<LaunchArg>,
    {
        let mut next = self.clone();
        next.default_arguments = args.into_iter().map(Into::into).collect();
        next
    }

    /// Send the child's stderr into the stdout capture.
    pub fn with_combined_output(&self, combined: bool) -> Self {
        let mut next = self.clone();
        next.combined_output = combined;
        next
    }

    /// Replace the set of exit codes treated as success.
    pub fn with_expected_exit_codes<I>(&self, codes: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut next = self.clone();
        next.expected_exit_codes = codes.into_iter().collect();
        next
    }

    fn overlay_entry(&self, key: &str) -> Option<(&String, &Option<String>)> {
        let platform = self.platform;
        self.environment
            .iter()
            .find(|(k, _)| platform.env_key_eq(k, key))
    }

    fn set_overlay(&mut self, key: String, value: Option<String>) {
        let platform = self.platform;
        self.environment.retain(|k, _| !platform.env_key_eq(k, &key));
        self.environment.insert(key, value);
    }
}

/// UTF-8 form of an inherited search path.
///
/// Entries that are not valid UTF-8 are dropped rather than mangled, so
/// every directory that survives is searched exactly as inherited.
fn inherited_search_path(value: OsString, platform: Platform) -> String {
    let raw = match value.into_string() {
        Ok(path) => return path,
        Err(raw) => raw,
    };

    let separator = platform.path_list_separator();
    let kept: Vec<String> = split_os_path_list(&raw, separator)
        .into_iter()
        .filter_map(|entry| match entry.into_string() {
            Ok(entry) => Some(entry),
            Err(entry) => {
                warn!(
                    entry = %entry.to_string_lossy(),
                    "search path entry is not valid UTF-8; left out of the overlay"
                );
                None
            }
        })
        .collect();
    kept.join(separator.to_string().as_str())
}

#[cfg(unix)]
fn split_os_path_list(value: &std::ffi::OsStr, separator: char) -> Vec<OsString> {
    use std::os::unix::ffi::OsStrExt;

    let separator = separator as u8;
    value
        .as_bytes()
        .split(|b| *b == separator)
        .map(|entry| std::ffi::OsStr::from_bytes(entry).to_os_string())
        .collect()
}

#[cfg(not(unix))]
fn split_os_path_list(value: &std::ffi::OsStr, separator: char) -> Vec<OsString> {
    // Entries here cannot be split on raw bytes; keep whatever decodes.
    value
        .to_string_lossy()
        .split(separator)
        .filter(|entry| !entry.contains('\u{fffd}'))
        .map(OsString::from)
        .collect()
}

/// `entry` followed by `existing`, joined with the platform separator.
pub fn prepend_path_entry(entry: &str, existing: &str, platform: Platform) -> String {
    if existing.is_empty() {
        entry.to_string()
    } else {
        format!("{entry}{}{existing}", platform.path_list_separator())
    }
}
