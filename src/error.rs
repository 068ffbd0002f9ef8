use std::path::PathBuf;
use thiserror::Error;

pub type WineResult<T> = std::result::Result<T, WineError>;

/// Errors surfaced by the runtime layer.
///
/// Subprocess launch failures other than a missing executable are not part
/// of this enum: they are absorbed by the runner and reported as `None`.
#[derive(Debug, Error)]
pub enum WineError {
    #[error("{} doesn't seem a valid {distribution} installation, missing: {}", root.display(), missing.join(", "))]
    InvalidInstallation {
        root: PathBuf,
        distribution: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("Cannot kill the protected process: {0}")]
    ProtectedProcess(String),

    #[error("unsupported wineboot status: {0}")]
    UnsupportedBootStatus(u8),

    #[error("unsupported DLL override mode: {0}")]
    UnsupportedOverride(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
