// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`env`] turns a configuration's environment overlay into the child's
//!   effective environment.
//! - [`resolve`] finds the executable to launch.
//! - [`plan`] ties both together into a [`LaunchPlan`], spawns the child with
//!   its output captured, waits and checks the exit code.
//! - [`completed`] holds the [`CompletedProcess`] handed back to callers.

pub mod completed;
pub mod env;
pub mod plan;
pub mod resolve;

pub use completed::CompletedProcess;
pub use env::ResolvedEnvironment;
pub use plan::LaunchPlan;
pub use resolve::{resolve_executable, search_candidates, search_executable};
