// src/errors.rs

//! Crate-wide error type and result alias.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Unsupported environment: cannot spawn processes for program '{0}' on this host")]
    UnsupportedEnvironment(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Executable not found for program '{name}': {reason}")]
    ExecutableNotFound { name: String, reason: String },

    #[error("Failed to spawn program '{name}': {source}")]
    SpawnFailure {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed waiting for program '{name}': {source}")]
    WaitFailure {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Program '{name}' exited with unexpected code {code}")]
    UnexpectedExitCode { name: String, code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;
