use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Filter applied to wine's own diagnostics through `WINEDEBUG`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verbosity {
    #[default]
    Silent,
    Quiet,
    NoFixme,
    Debug,
}

impl Verbosity {
    /// Map a numeric level, anything unknown stays silent.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Quiet,
            2 => Verbosity::NoFixme,
            3 => Verbosity::Debug,
            _ => Verbosity::default(),
        }
    }

    pub fn winedebug(self) -> &'static str {
        match self {
            Verbosity::Silent => "-all",
            Verbosity::Quiet => "-warn+all",
            Verbosity::NoFixme => "fixme-all",
            Verbosity::Debug => "+all",
        }
    }
}
