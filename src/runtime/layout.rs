use crate::error::{WineError, WineResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Subdirectories every wine installation ships.
pub const REQUIRED_DIRS: [&str; 4] = ["lib64", "share", "bin", "lib"];

const WINE_BINARY: &str = "wine";

/// How an installation root maps to the actual wine tree.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// A plain wine build, the root is the install tree.
    #[default]
    Wine,
    /// A Proton release, the wine tree lives under `dist`.
    Proton,
}

impl Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distribution::Wine => write!(f, "wine"),
            Distribution::Proton => write!(f, "proton"),
        }
    }
}

impl Distribution {
    pub fn install_dir(self, root: &Path) -> PathBuf {
        match self {
            Distribution::Wine => root.to_path_buf(),
            Distribution::Proton => root.join("dist"),
        }
    }

    pub fn binary_path(self, root: &Path) -> PathBuf {
        self.install_dir(root).join("bin").join(WINE_BINARY)
    }

    pub fn validate(self, root: &Path) -> WineResult<()> {
        let install_dir = self.install_dir(root);
        let missing = REQUIRED_DIRS
            .into_iter()
            .filter(|dir| !install_dir.join(dir).is_dir())
            .collect::<Vec<_>>();

        if missing.is_empty() {
            return Ok(());
        }

        Err(WineError::InvalidInstallation {
            root: root.to_path_buf(),
            distribution: match self {
                Distribution::Wine => "Wine",
                Distribution::Proton => "Proton",
            },
            missing,
        })
    }
}
