// src/config/args.rs

//! Command-line argument values.

use std::ffi::OsStr;
use std::fmt;

use crate::errors::{LaunchError, Result};

/// A single argument passed to a launched program.
///
/// Only strings and integers are accepted; integers are rendered in their
/// decimal form. Statically typed callers get this through the `From`
/// impls, dynamically typed input (launch files) goes through
/// [`LaunchArg::from_value`] and fails with [`LaunchError::InvalidArgument`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaunchArg(String);

impl LaunchArg {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Convert a dynamically typed TOML value.
    pub fn from_value(value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::String(s) => Ok(LaunchArg(s.clone())),
            toml::Value::Integer(i) => Ok(LaunchArg(i.to_string())),
            other => Err(LaunchError::InvalidArgument(format!(
                "expected an integer or a string, got {} `{}`",
                other.type_str(),
                other
            ))),
        }
    }

    /// Convert a whole list, failing on the first unsupported element.
    pub fn from_values<'a, I>(values: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = &'a toml::Value>,
    {
        values.into_iter().map(Self::from_value).collect()
    }
}

impl TryFrom<&toml::Value> for LaunchArg {
    type Error = LaunchError;

    fn try_from(value: &toml::Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<String> for LaunchArg {
    fn from(s: String) -> Self {
        LaunchArg(s)
    }
}

impl From<&str> for LaunchArg {
    fn from(s: &str) -> Self {
        LaunchArg(s.to_string())
    }
}

impl From<&&str> for LaunchArg {
    fn from(s: &&str) -> Self {
        LaunchArg((*s).to_string())
    }
}

impl From<&String> for LaunchArg {
    fn from(s: &String) -> Self {
        LaunchArg(s.clone())
    }
}

impl From<&LaunchArg> for LaunchArg {
    fn from(arg: &LaunchArg) -> Self {
        arg.clone()
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LaunchArg {
                fn from(n: $t) -> Self {
                    LaunchArg(n.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl AsRef<str> for LaunchArg {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<OsStr> for LaunchArg {
    fn as_ref(&self) -> &OsStr {
        OsStr::new(&self.0)
    }
}

impl fmt::Display for LaunchArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
