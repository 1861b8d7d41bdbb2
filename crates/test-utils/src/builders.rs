#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Builder for small `/bin/sh` scripts used as launch targets in tests.
pub struct ScriptBuilder {
    name: String,
    body: Vec<String>,
    mode: u32,
}

impl ScriptBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: Vec::new(),
            mode: 0o755,
        }
    }

    pub fn line(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    /// Script that prints `$0` and each argument on its own line.
    pub fn echo_argv(name: &str) -> Self {
        Self::new(name).line(r#"printf '%s\n' "$0" "$@""#)
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn contents(&self) -> String {
        let mut s = String::from("#!/bin/sh\n");
        for line in &self.body {
            s.push_str(line);
            s.push('\n');
        }
        s
    }

    /// Write the script into `dir` and set its permissions.
    #[cfg(unix)]
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(&self.name);
        fs::write(&path, self.contents())
            .with_context(|| format!("writing script {:?}", path))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(self.mode))
            .with_context(|| format!("setting permissions on {:?}", path))?;
        Ok(path)
    }
}

/// Builder for TOML launch files.
pub struct LaunchFileBuilder {
    top: Vec<String>,
    environment: Vec<(String, String)>,
}

impl LaunchFileBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            top: vec![format!("name = {}", quote(name))],
            environment: Vec::new(),
        }
    }

    pub fn executable(self, path: impl AsRef<Path>) -> Self {
        let value = quote(&path.as_ref().to_string_lossy());
        self.raw(&format!("executable = {value}"))
    }

    pub fn working_directory(self, path: impl AsRef<Path>) -> Self {
        let value = quote(&path.as_ref().to_string_lossy());
        self.raw(&format!("working_directory = {value}"))
    }

    /// `args` is a TOML array literal, e.g. `["-c", 3]`.
    pub fn default_arguments(self, args: &str) -> Self {
        self.raw(&format!("default_arguments = {args}"))
    }

    pub fn combined_output(self, val: bool) -> Self {
        self.raw(&format!("combined_output = {val}"))
    }

    pub fn expected_exit_codes(self, codes: &[i32]) -> Self {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        self.raw(&format!("expected_exit_codes = [{}]", codes.join(", ")))
    }

    pub fn additional_paths(self, dirs: &[&str]) -> Self {
        let dirs: Vec<String> = dirs.iter().map(|d| quote(d)).collect();
        self.raw(&format!("additional_paths = [{}]", dirs.join(", ")))
    }

    pub fn unset_environment(self, keys: &[&str]) -> Self {
        let keys: Vec<String> = keys.iter().map(|k| quote(k)).collect();
        self.raw(&format!("unset_environment = [{}]", keys.join(", ")))
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.environment.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a verbatim top-level line.
    pub fn raw(mut self, line: &str) -> Self {
        self.top.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut s = self.top.join("\n");
        s.push('\n');
        if !self.environment.is_empty() {
            s.push_str("\n[environment]\n");
            for (k, v) in &self.environment {
                s.push_str(&format!("{k} = {}\n", quote(v)));
            }
        }
        s
    }

    pub fn write_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        fs::write(&path, self.build())
            .with_context(|| format!("writing launch file {:?}", path))?;
        Ok(path)
    }
}

fn quote(s: &str) -> String {
    // TOML literal strings take everything verbatim except a single quote.
    if s.contains('\'') {
        format!("{s:?}")
    } else {
        format!("'{s}'")
    }
}
