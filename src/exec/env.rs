// src/exec/env.rs

//! Effective environment of a launch.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::process::Command;

use tracing::debug;

use crate::platform::Platform;

/// Environment handed to the child process.
///
/// `Inherit` is what an empty overlay resolves to: the child gets the
/// parent's environment untouched. `Explicit` is a full snapshot with the
/// overlay applied, even when the overlay happened to change nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEnvironment {
    Inherit,
    Explicit(BTreeMap<OsString, OsString>),
}

impl ResolvedEnvironment {
    /// Resolve `overlay` against the current process environment.
    pub fn resolve(overlay: &BTreeMap<String, Option<String>>, platform: Platform) -> Self {
        if overlay.is_empty() {
            debug!("empty environment overlay; inheriting parent environment");
            return ResolvedEnvironment::Inherit;
        }
        Self::from_snapshot(std::env::vars_os(), overlay, platform)
    }

    /// Apply `overlay` on top of an explicit snapshot.
    pub fn from_snapshot<I>(
        snapshot: I,
        overlay: &BTreeMap<String, Option<String>>,
        platform: Platform,
    ) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut vars: BTreeMap<OsString, OsString> = snapshot.into_iter().collect();

        for (key, value) in overlay.iter() {
            vars.retain(|k, _| !key_matches(platform, k, key));
            match value {
                Some(value) => {
                    debug!(key = %key, "environment variable set");
                    vars.insert(OsString::from(key), OsString::from(value));
                }
                None => debug!(key = %key, "environment variable removed"),
            }
        }

        ResolvedEnvironment::Explicit(vars)
    }

    /// Look up `key` as the child will see it.
    pub fn get(&self, key: &str, platform: Platform) -> Option<OsString> {
        match self {
            ResolvedEnvironment::Inherit => std::env::var_os(key),
            ResolvedEnvironment::Explicit(vars) => vars
                .iter()
                .find(|(k, _)| key_matches(platform, k, key))
                .map(|(_, v)| v.clone()),
        }
    }

    pub fn is_inherited(&self) -> bool {
        matches!(self, ResolvedEnvironment::Inherit)
    }

    /// Configure `cmd` to run with this environment.
    pub fn apply_to(&self, cmd: &mut Command) {
        if let ResolvedEnvironment::Explicit(vars) = self {
            cmd.env_clear();
            cmd.envs(vars);
        }
    }
}

fn key_matches(platform: Platform, candidate: &OsStr, key: &str) -> bool {
    candidate
        .to_str()
        .is_some_and(|candidate| platform.env_key_eq(candidate, key))
}
