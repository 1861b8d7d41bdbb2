// src/lib.rs

//! Launch external programs with a reproducible environment and captured
//! output.
//!
//! A [`LaunchConfiguration`] describes how to find and invoke a program.
//! It is an immutable value: every `with_*` call returns a new
//! configuration, so one value can be kept around and shared between
//! threads. [`LaunchConfiguration::run`] resolves the executable, spawns it
//! with stdin closed and stdout/stderr captured into temporary files, waits
//! for it to exit and checks the exit code against the accepted set.
//!
//! The captured output of a [`CompletedProcess`] is read line by line with
//! [`lines::lines_of`] or the `stdout_lines` / `stderr_lines` helpers.

pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod lines;
pub mod logging;
pub mod platform;

pub use config::{LaunchArg, LaunchConfiguration};
pub use errors::{LaunchError, Result};
pub use exec::{CompletedProcess, LaunchPlan};
pub use lines::lines_of;
pub use platform::Platform;
