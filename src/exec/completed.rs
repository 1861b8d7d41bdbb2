// src/exec/completed.rs

use std::fs::File;
use std::io::{self, Read, Seek};

use crate::lines::{OutputLines, lines_of};

/// Result of a finished launch.
///
/// Owns the capture files holding the child's output. They are anonymous
/// temporary files, closed (and reclaimed by the OS) when this value is
/// dropped.
#[derive(Debug)]
pub struct CompletedProcess {
    name: String,
    stdout: File,
    stderr: File,
    exit_code: i32,
}

impl CompletedProcess {
    pub(crate) fn new(name: String, stdout: File, stderr: File, exit_code: i32) -> Self {
        Self {
            name,
            stdout,
            stderr,
            exit_code,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Raw stdout capture. Shares its read position with the line helpers.
    pub fn standard_output(&self) -> &File {
        &self.stdout
    }

    /// Raw stderr capture; always empty when output was combined.
    pub fn standard_error(&self) -> &File {
        &self.stderr
    }

    /// Fresh line sequence over stdout, starting from the beginning.
    pub fn stdout_lines(&self) -> io::Result<OutputLines<&File>> {
        rewound_lines(&self.stdout)
    }

    /// Fresh line sequence over stderr, starting from the beginning.
    pub fn stderr_lines(&self) -> io::Result<OutputLines<&File>> {
        rewound_lines(&self.stderr)
    }

    /// Whole stdout capture as text (lossy UTF-8).
    pub fn stdout_string(&self) -> io::Result<String> {
        read_all(&self.stdout)
    }

    /// Whole stderr capture as text (lossy UTF-8).
    pub fn stderr_string(&self) -> io::Result<String> {
        read_all(&self.stderr)
    }
}

fn rewound_lines(mut file: &File) -> io::Result<OutputLines<&File>> {
    file.rewind()?;
    Ok(lines_of(file))
}

fn read_all(mut file: &File) -> io::Result<String> {
    file.rewind()?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
