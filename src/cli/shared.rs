use crate::config::WinectlConfig;
use crate::prelude::*;
use clap::Args;
use std::path::{Path, PathBuf};
use winectl::executor::helpers::env::is_debug_enabled;
use winectl::{Distribution, Runtime, Verbosity};

/// Arguments selecting the wine installation and the prefix, shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct RuntimeArgs {
    /// Root directory of the wine (or Proton) installation
    #[arg(long, env = "WINECTL_RUNTIME", global = true)]
    pub runtime: Option<String>,

    /// The installation is a Proton release
    #[arg(long, global = true)]
    pub proton: bool,

    /// The wineprefix to operate on. Defaults to ~/.wine
    #[arg(long, env = "WINECTL_PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Filter applied to wine's own diagnostics
    #[arg(long, value_enum, global = true)]
    pub verbosity: Option<Verbosity>,
}

const DEFAULT_PREFIX: &str = "~/.wine";

// A ~ can reach us unexpanded through the environment or the config file
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn expand_path(path: &Path) -> PathBuf {
    expand(&path.to_string_lossy())
}

impl RuntimeArgs {
    pub fn distribution(&self, config: &WinectlConfig) -> Distribution {
        if self.proton {
            Distribution::Proton
        } else {
            config.runtime.distribution
        }
    }

    pub fn runtime_root(&self, config: &WinectlConfig) -> Result<PathBuf> {
        match (&self.runtime, &config.runtime.path) {
            (Some(path), _) => Ok(expand(path)),
            (None, Some(path)) => Ok(expand_path(path)),
            (None, None) => bail!(
                "No wine runtime configured. Use --runtime <path> or persist one with `winectl config set --runtime <path>`."
            ),
        }
    }

    pub fn prefix(&self, config: &WinectlConfig) -> PathBuf {
        match (&self.prefix, &config.prefix) {
            (Some(prefix), _) => expand(prefix),
            (None, Some(prefix)) => expand_path(prefix),
            (None, None) => expand(DEFAULT_PREFIX),
        }
    }

    /// Priority: flag, then config file, then `WINECTL_LOG=debug` which
    /// turns wine's own traces on too.
    pub fn verbosity(&self, config: &WinectlConfig) -> Verbosity {
        self.verbosity
            .or(config.verbosity)
            .unwrap_or_else(|| {
                if is_debug_enabled() {
                    Verbosity::Debug
                } else {
                    Verbosity::default()
                }
            })
    }

    pub fn resolve(&self, config: &WinectlConfig) -> Result<Runtime> {
        let distribution = self.distribution(config);
        let root = self.runtime_root(config)?;
        let prefix = self.prefix(config);

        let runtime = Runtime::new(distribution, &root, &prefix)
            .with_context(|| format!("Unusable {distribution} runtime at {}", root.display()))?
            .with_verbosity(self.verbosity(config));
        debug!("Resolved {runtime:?}");
        Ok(runtime)
    }
}
