// src/platform.rs

//! Host platform identity.
//!
//! The launcher only needs a coarse classification of the host: which
//! environment variable holds the executable search path, how its entries
//! are separated, and whether executables are looked up with a list of
//! file extensions (`PATHEXT`).

/// Coarse classification of the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    PosixLike,
    WindowsLike,
    Unknown,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::WindowsLike
        } else if cfg!(unix) {
            Platform::PosixLike
        } else {
            Platform::Unknown
        }
    }

    /// Name of the executable search-path variable.
    pub fn path_variable(self) -> &'static str {
        match self {
            Platform::WindowsLike => "Path",
            Platform::PosixLike | Platform::Unknown => "PATH",
        }
    }

    /// Separator between entries of the search-path variable.
    pub fn path_list_separator(self) -> char {
        match self {
            Platform::WindowsLike => ';',
            Platform::PosixLike | Platform::Unknown => ':',
        }
    }

    /// Variable listing executable suffixes, on platforms that use one.
    pub fn extension_list_variable(self) -> Option<&'static str> {
        match self {
            Platform::WindowsLike => Some("PATHEXT"),
            Platform::PosixLike | Platform::Unknown => None,
        }
    }

    /// Separator between entries of the extension-list variable.
    pub fn extension_list_separator(self) -> char {
        ';'
    }

    /// Whether environment variable names compare case-insensitively.
    pub fn env_keys_case_insensitive(self) -> bool {
        matches!(self, Platform::WindowsLike)
    }

    /// Whether the host can create child processes at all.
    pub fn supports_process_spawning(self) -> bool {
        !matches!(self, Platform::Unknown)
    }

    /// Compare two environment variable names under this platform's rules.
    pub fn env_key_eq(self, a: &str, b: &str) -> bool {
        if self.env_keys_case_insensitive() {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }
}
