// src/config/mod.rs

//! Launch configuration: the immutable builder, its argument type and
//! launch-file loading.

pub mod args;
pub mod loader;
pub mod model;
pub mod validate;

pub use args::LaunchArg;
pub use loader::{RawLaunchFile, load_and_build, load_from_path, load_from_str};
pub use model::LaunchConfiguration;
