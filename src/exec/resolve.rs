// src/exec/resolve.rs

//! Executable lookup along the search path.

use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;

use crate::config::LaunchConfiguration;
use crate::errors::{LaunchError, Result};
use crate::exec::env::ResolvedEnvironment;
use crate::fs::FileSystem;
use crate::platform::Platform;

/// Decide which file to launch for `config`.
///
/// An explicit executable wins and is used verbatim. Otherwise the program
/// name is searched along the search-path variable of `env`.
pub fn resolve_executable(
    config: &LaunchConfiguration,
    env: &ResolvedEnvironment,
    fs: &dyn FileSystem,
) -> Result<PathBuf> {
    if let Some(exe) = config.executable() {
        return Ok(exe.to_path_buf());
    }
    search_executable(config.name(), env, config.platform(), fs)
}

/// Search `name` along the search path visible in `env`.
pub fn search_executable(
    name: &str,
    env: &ResolvedEnvironment,
    platform: Platform,
    fs: &dyn FileSystem,
) -> Result<PathBuf> {
    if !is_bare_name(name, platform) {
        return Err(LaunchError::ExecutableNotFound {
            name: name.to_string(),
            reason: "program name is not a bare file name; configure an explicit executable"
                .to_string(),
        });
    }

    let path_var = platform.path_variable();
    let Some(search_path) = env.get(path_var, platform) else {
        return Err(LaunchError::ExecutableNotFound {
            name: name.to_string(),
            reason: format!("search path variable '{path_var}' is not set"),
        });
    };
    let extensions = platform
        .extension_list_variable()
        .and_then(|var| env.get(var, platform))
        .map(|v| v.to_string_lossy().into_owned());

    for candidate in search_candidates(name, &search_path, extensions.as_deref(), platform) {
        if fs.exists(&candidate) {
            debug!(program = name, path = %candidate.display(), "executable resolved");
            return Ok(candidate);
        }
        debug!(program = name, path = %candidate.display(), "candidate does not exist");
    }

    Err(LaunchError::ExecutableNotFound {
        name: name.to_string(),
        reason: format!("no match in '{path_var}'"),
    })
}

/// Every path tried for `name`, in search order.
///
/// Directories come in search-path order; within each directory the bare
/// name is tried first, followed by each entry of `extensions` on platforms
/// that use an extension list. Empty directory entries are skipped. A
/// `name` that is not a bare file name has no candidates.
pub fn search_candidates(
    name: &str,
    search_path: impl AsRef<OsStr>,
    extensions: Option<&str>,
    platform: Platform,
) -> Vec<PathBuf> {
    if !is_bare_name(name, platform) {
        return Vec::new();
    }

    let mut suffixes = vec![""];
    if platform.extension_list_variable().is_some() {
        if let Some(exts) = extensions {
            suffixes.extend(
                exts.split(platform.extension_list_separator())
                    .filter(|ext| !ext.is_empty()),
            );
        }
    }

    let suffixes = &suffixes;
    split_path_list(search_path.as_ref(), platform.path_list_separator())
        .into_iter()
        .flat_map(move |dir| {
            suffixes
                .iter()
                .map(move |ext| dir.join(format!("{name}{ext}")))
        })
        .collect()
}

/// A single file-name component: no directory part, no drive prefix.
fn is_bare_name(name: &str, platform: Platform) -> bool {
    let separators: &[char] = match platform {
        Platform::WindowsLike => &['/', '\\', ':'],
        Platform::PosixLike | Platform::Unknown => &['/'],
    };
    !name.is_empty() && name != "." && name != ".." && !name.contains(separators)
}

/// Non-empty entries of a path list, kept as raw OS strings.
#[cfg(unix)]
fn split_path_list(value: &OsStr, separator: char) -> Vec<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    // Path-list separators are ASCII.
    let separator = separator as u8;
    value
        .as_bytes()
        .split(|b| *b == separator)
        .filter(|dir| !dir.is_empty())
        .map(|dir| PathBuf::from(OsStr::from_bytes(dir)))
        .collect()
}

#[cfg(not(unix))]
fn split_path_list(value: &OsStr, separator: char) -> Vec<PathBuf> {
    value
        .to_string_lossy()
        .split(separator)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect()
}
