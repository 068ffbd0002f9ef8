use std::{env, fs, path::PathBuf};

use crate::prelude::*;
use nestify::nest;
use serde::{Deserialize, Serialize};
use winectl::{Distribution, Verbosity};

nest! {
    #[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]*
    #[serde(rename_all = "kebab-case")]*
    /// Persistent configuration for the winectl CLI.
    ///
    /// Stored at `~/.config/winectl/config.yaml` (or `<name>.yaml` when a
    /// configuration name is given). Every field is optional, command line
    /// flags take precedence over it.
    pub struct WinectlConfig {
        #[serde(default)]
        pub runtime: pub struct RuntimeConfig {
            pub path: Option<PathBuf>,
            #[serde(default)]
            pub distribution: Distribution,
        },
        pub prefix: Option<PathBuf>,
        pub verbosity: Option<Verbosity>,
        pub terminal: Option<String>,
    }
}

/// Get the path to the configuration file, following the XDG Base Directory Specification
/// at https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html
///
/// If config_name is None, returns ~/.config/winectl/config.yaml (default)
/// If config_name is Some, returns ~/.config/winectl/{config_name}.yaml
fn get_configuration_file_path(config_name: Option<&str>) -> Result<PathBuf> {
    let config_dir = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = env::var("HOME").context("HOME env variable not set")?;
            PathBuf::from(home).join(".config")
        }
    };
    let config_dir = config_dir.join("winectl");

    Ok(match config_name {
        Some(name) => config_dir.join(format!("{name}.yaml")),
        None => config_dir.join("config.yaml"),
    })
}

impl WinectlConfig {
    /// Load the configuration. If it does not exist, return a default configuration.
    pub fn load(config_name: Option<&str>) -> Result<Self> {
        let config_path = get_configuration_file_path(config_name)?;

        match fs::read(&config_path) {
            Ok(config_str) => {
                let config: WinectlConfig =
                    serde_yaml::from_slice(&config_str).context(format!(
                        "Failed to parse winectl config at {}",
                        config_path.display()
                    ))?;
                debug!("Config loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file not found at {}", config_path.display());
                Ok(WinectlConfig::default())
            }
            Err(e) => bail!("Failed to load config: {e}"),
        }
    }

    /// Persist changes to the configuration
    pub fn persist(&self, config_name: Option<&str>) -> Result<()> {
        let config_path = get_configuration_file_path(config_name)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = serde_yaml::to_string(self)?;
        fs::write(&config_path, config_str)?;
        debug!("Config written to {}", config_path.display());

        Ok(())
    }
}
