//! Launching subprocesses.
//!
//! Every call builds exactly one OS process and nothing is cached between
//! calls. A missing executable is reported as
//! [`WineError::ExecutableNotFound`]; any other launch failure is logged and
//! turned into `Ok(None)` so best-effort callers keep going.

pub mod helpers;
#[cfg(test)]
pub mod testing;

use crate::error::{WineError, WineResult};
use crate::prelude::*;
use helpers::capture::{CombinedOutput, collect_output};
pub use helpers::command::CommandBuilder;
use helpers::env::{current_env, merge_env};
use helpers::working_dir::resolve_working_dir;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};

pub const EXECUTOR_TARGET: &str = "executor";

/// One command to run, owned by the call that issues it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRequest {
    pub command: CommandBuilder,
    pub working_dir: Option<PathBuf>,
    /// Variables laid over the caller's environment.
    pub env: BTreeMap<String, String>,
}

impl ExecutionRequest {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut command = CommandBuilder::new(program);
        command.args(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        Self::from(command)
    }

    /// Split a single command string the way a POSIX shell would, without
    /// running a shell.
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut argv = shell_words::split(line)
            .with_context(|| format!("Invalid command line: {line}"))?
            .into_iter();
        let program = argv.next().context("The command line is empty")?;
        Ok(Self::new(&program, argv))
    }

    pub fn working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_owned());
        self
    }

    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs(mut self, envs: &BTreeMap<String, String>) -> Self {
        self.env
            .extend(envs.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn stdin<S: Into<String>>(mut self, script: S) -> Self {
        self.command.stdin(script);
        self
    }
}

impl From<CommandBuilder> for ExecutionRequest {
    fn from(command: CommandBuilder) -> Self {
        Self {
            command,
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}

/// The boundary between the runtime and the operating system.
pub trait Runner: Send + Sync {
    /// Start the command and return without waiting for it.
    fn spawn(&self, request: ExecutionRequest) -> WineResult<Option<Child>>;

    /// Run the command to completion and return its combined stdout and
    /// stderr, decoded lossily as UTF-8.
    fn capture(&self, request: ExecutionRequest) -> WineResult<Option<String>>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    scratch_dir: PathBuf,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
        }
    }
}

impl SystemRunner {
    /// `scratch_dir` is used when the requested working directory is absent
    /// or cannot be created.
    pub fn with_scratch_dir<P: AsRef<Path>>(scratch_dir: P) -> Self {
        Self {
            scratch_dir: scratch_dir.as_ref().to_owned(),
        }
    }

    /// Resolve the working directory and the full environment of a request.
    pub fn prepare(&self, request: ExecutionRequest) -> CommandBuilder {
        let ExecutionRequest {
            mut command,
            working_dir,
            env,
        } = request;
        command
            .envs(merge_env(current_env(), &env))
            .current_dir(resolve_working_dir(
                working_dir.as_deref(),
                &self.scratch_dir,
            ));
        command
    }

    /// `output` replaces the inherited stdout and stderr. The built command
    /// and its copies of those handles are dropped before returning.
    fn launch(
        &self,
        request: ExecutionRequest,
        output: Option<(Stdio, Stdio)>,
    ) -> WineResult<Option<Child>> {
        let builder = self.prepare(request);
        debug!(target: EXECUTOR_TARGET, "Running: {}", builder.as_command_line());

        let mut cmd = builder.build();
        cmd.stdin(match builder.get_stdin() {
            Some(_) => Stdio::piped(),
            None => Stdio::null(),
        });
        if let Some((stdout, stderr)) = output {
            cmd.stdout(stdout).stderr(stderr);
        }

        match cmd.spawn() {
            Ok(child) => Ok(Some(child)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                WineError::ExecutableNotFound(builder.get_program().to_string_lossy().into_owned()),
            ),
            Err(e) => {
                warn!("Failed to launch {}: {e}", builder.as_command_line());
                Ok(None)
            }
        }
    }
}

impl Runner for SystemRunner {
    fn spawn(&self, request: ExecutionRequest) -> WineResult<Option<Child>> {
        let stdin = request.command.get_stdin().map(str::to_owned);
        let Some(mut child) = self.launch(request, None)? else {
            return Ok(None);
        };

        if let (Some(script), Some(mut input)) = (stdin, child.stdin.take()) {
            use std::io::Write;
            if let Err(e) = input.write_all(script.as_bytes()) {
                warn!("Failed to write the input script: {e}");
            }
        }

        Ok(Some(child))
    }

    fn capture(&self, request: ExecutionRequest) -> WineResult<Option<String>> {
        let stdin = request.command.get_stdin().map(str::to_owned);
        let (reader, stdout, stderr) = CombinedOutput::new()?.into_parts();
        let Some(mut child) = self.launch(request, Some((stdout, stderr)))? else {
            return Ok(None);
        };

        let (status, output) = collect_output(&mut child, reader, stdin.as_deref())?;
        debug!(target: EXECUTOR_TARGET, "Command exited with {status}");
        Ok(Some(output))
    }
}
