// src/exec/plan.rs

//! Launching a configured program: resolve, spawn, wait, validate.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info, warn};

use crate::config::{LaunchArg, LaunchConfiguration};
use crate::errors::{LaunchError, Result};
use crate::exec::completed::CompletedProcess;
use crate::exec::env::ResolvedEnvironment;
use crate::exec::resolve::resolve_executable;
use crate::fs::{FileSystem, RealFileSystem};

/// Everything needed to start one child process.
///
/// Produced by [`LaunchConfiguration::prepare`]; holds no OS resources until
/// [`LaunchPlan::execute`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    name: String,
    executable: PathBuf,
    arguments: Vec<LaunchArg>,
    working_directory: Option<PathBuf>,
    environment: ResolvedEnvironment,
    combined_output: bool,
    expected_exit_codes: BTreeSet<i32>,
}

impl LaunchPlan {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Arguments after the executable: defaults first, then runtime ones.
    pub fn arguments(&self) -> &[LaunchArg] {
        &self.arguments
    }

    /// Full argument vector, starting with the executable path.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.executable.to_string_lossy().into_owned())
            .chain(self.arguments.iter().map(|a| a.as_str().to_string()))
            .collect()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    pub fn environment(&self) -> &ResolvedEnvironment {
        &self.environment
    }

    /// Whether `code` counts as a successful exit.
    pub fn accepts_exit_code(&self, code: i32) -> bool {
        self.expected_exit_codes.contains(&code)
    }

    /// Spawn the child, block until it exits and check its exit code.
    pub fn execute(&self) -> Result<CompletedProcess> {
        let stdout_sink = tempfile::tempfile()?;
        let stderr_sink = tempfile::tempfile()?;

        let status = {
            let mut cmd = self.command(&stdout_sink, &stderr_sink)?;

            info!(
                program = %self.name,
                executable = %self.executable.display(),
                args = self.arguments.len(),
                combined_output = self.combined_output,
                "starting process"
            );

            let mut child = cmd.spawn().map_err(|source| LaunchError::SpawnFailure {
                name: self.name.clone(),
                source,
            })?;

            child.wait().map_err(|source| LaunchError::WaitFailure {
                name: self.name.clone(),
                source,
            })?
        };

        let code = self.exit_code_of(status);
        info!(program = %self.name, exit_code = code, "process exited");

        let mut stdout_sink = stdout_sink;
        let mut stderr_sink = stderr_sink;
        stdout_sink.rewind()?;
        stderr_sink.rewind()?;

        if !self.accepts_exit_code(code) {
            return Err(LaunchError::UnexpectedExitCode {
                name: self.name.clone(),
                code,
            });
        }

        Ok(CompletedProcess::new(
            self.name.clone(),
            stdout_sink,
            stderr_sink,
            code,
        ))
    }

    fn command(&self, stdout_sink: &File, stderr_sink: &File) -> Result<Command> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.arguments).stdin(Stdio::null());

        cmd.stdout(Stdio::from(stdout_sink.try_clone()?));
        if self.combined_output {
            cmd.stderr(Stdio::from(stdout_sink.try_clone()?));
        } else {
            cmd.stderr(Stdio::from(stderr_sink.try_clone()?));
        }

        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }
        self.environment.apply_to(&mut cmd);

        Ok(cmd)
    }

    fn exit_code_of(&self, status: ExitStatus) -> i32 {
        match status.code() {
            Some(code) => code,
            None => {
                warn!(program = %self.name, %status, "process terminated without an exit code");
                -1
            }
        }
    }
}

impl LaunchConfiguration {
    /// Resolve arguments, environment and executable without spawning.
    pub fn prepare<I, A>(&self, args: I) -> Result<LaunchPlan>
    where
        I: IntoIterator<Item = A>,
        A: Into<LaunchArg>,
    {
        self.prepare_with_fs(args, &RealFileSystem)
    }

    /// Like [`prepare`](Self::prepare), checking candidates through `fs`.
    pub fn prepare_with_fs<I, A>(&self, args: I, fs: &dyn FileSystem) -> Result<LaunchPlan>
    where
        I: IntoIterator<Item = A>,
        A: Into<LaunchArg>,
    {
        let arguments: Vec<LaunchArg> = self
            .default_arguments()
            .iter()
            .cloned()
            .chain(args.into_iter().map(Into::into))
            .collect();
        debug!(program = %self.name(), ?arguments, "arguments normalized");

        let environment = ResolvedEnvironment::resolve(self.environment(), self.platform());
        let executable = resolve_executable(self, &environment, fs)?;

        Ok(LaunchPlan {
            name: self.name().to_string(),
            executable,
            arguments,
            working_directory: self.working_directory().map(Path::to_path_buf),
            environment,
            combined_output: self.combined_output(),
            expected_exit_codes: self.expected_exit_codes().clone(),
        })
    }

    /// Launch the program with `args` after the default arguments.
    ///
    /// Blocks until the child exits. There is no timeout: a child that never
    /// exits blocks the caller forever.
    pub fn run<I, A>(&self, args: I) -> Result<CompletedProcess>
    where
        I: IntoIterator<Item = A>,
        A: Into<LaunchArg>,
    {
        self.prepare(args)?.execute()
    }

    /// Launch with the default arguments only.
    pub fn run_default(&self) -> Result<CompletedProcess> {
        self.run(std::iter::empty::<LaunchArg>())
    }

    /// Like [`run`](Self::run), checking candidates through `fs`.
    pub fn run_with_fs<I, A>(&self, args: I, fs: &dyn FileSystem) -> Result<CompletedProcess>
    where
        I: IntoIterator<Item = A>,
        A: Into<LaunchArg>,
    {
        self.prepare_with_fs(args, fs)?.execute()
    }
}
