//! A configured wine installation bound to one wineprefix.

mod boot;
mod layout;
mod process;
mod registry;
pub mod terminal;
#[cfg(test)]
mod tests;
mod tools;
mod verbosity;

pub use boot::BootStatus;
pub use layout::{Distribution, REQUIRED_DIRS};
pub use process::{PROTECTED_PROCESSES, WineProcess, is_protected};
pub use registry::{DLL_OVERRIDES_KEY, DllOverride, WindowsVersion};
pub use tools::Tool;
pub use verbosity::Verbosity;

use crate::error::WineResult;
use crate::executor::{CommandBuilder, ExecutionRequest, Runner, SystemRunner};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::sync::Arc;

/// Per-call knobs for [`Runtime::spawn`] and [`Runtime::capture`].
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pub env: BTreeMap<String, String>,
    /// Name or path of a terminal emulator to run the command in.
    pub terminal: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub stdin: Option<String>,
}

impl ExecOptions {
    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn terminal(mut self, terminal: Option<&str>) -> Self {
        self.terminal = terminal.map(str::to_owned);
        self
    }

    pub fn stdin<S: Into<String>>(mut self, script: S) -> Self {
        self.stdin = Some(script.into());
        self
    }

    pub fn working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_owned());
        self
    }
}

#[derive(Clone)]
pub struct Runtime {
    distribution: Distribution,
    root: PathBuf,
    prefix: PathBuf,
    verbosity: Verbosity,
    runner: Arc<dyn Runner>,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("distribution", &self.distribution)
            .field("root", &self.root)
            .field("prefix", &self.prefix)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

impl Runtime {
    /// Bind the installation at `root` to the wineprefix at `prefix`.
    ///
    /// Fails when the installation is missing one of [`REQUIRED_DIRS`]. The
    /// prefix itself is not checked, wine creates it on first use.
    pub fn new<R: AsRef<Path>, P: AsRef<Path>>(
        distribution: Distribution,
        root: R,
        prefix: P,
    ) -> WineResult<Self> {
        let root = root.as_ref().to_path_buf();
        distribution.validate(&root)?;

        Ok(Self {
            distribution,
            root,
            prefix: prefix.as_ref().to_path_buf(),
            verbosity: Verbosity::default(),
            runner: Arc::new(SystemRunner::default()),
        })
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Path of the main wine executable.
    pub fn binary(&self) -> PathBuf {
        self.distribution.binary_path(&self.root)
    }

    /// Compose the request for `wine <args...>` inside the prefix.
    pub fn request<I, S>(&self, args: I, options: ExecOptions) -> ExecutionRequest
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ExecOptions {
            env,
            terminal,
            working_dir,
            stdin,
        } = options;

        let mut command = CommandBuilder::new(self.binary());
        command.args(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        if let Some(terminal) = terminal.as_deref() {
            terminal::wrap_in_terminal(&mut command, terminal);
        }

        let mut request = ExecutionRequest::from(command)
            .envs(&env)
            .env("WINEPREFIX", self.prefix.to_string_lossy())
            .env("WINEDEBUG", self.verbosity.winedebug());
        if let Some(dir) = working_dir {
            request = request.working_dir(dir);
        }
        if let Some(script) = stdin {
            request = request.stdin(script);
        }
        request
    }

    /// Start `wine <args...>` and return right away.
    pub fn spawn<I, S>(&self, args: I, options: ExecOptions) -> WineResult<Option<Child>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.runner.spawn(self.request(args, options))
    }

    /// Run `wine <args...>` to completion and return what it printed.
    ///
    /// There is no timeout: a hung wine tool blocks the calling thread.
    pub fn capture<I, S>(&self, args: I, options: ExecOptions) -> WineResult<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.runner.capture(self.request(args, options))
    }
}
