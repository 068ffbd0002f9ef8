use crate::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Pick the directory a child process starts in.
///
/// A missing `requested` directory is created. When it cannot be created,
/// or when no directory is requested at all, `scratch` is used instead.
pub fn resolve_working_dir(requested: Option<&Path>, scratch: &Path) -> PathBuf {
    let Some(requested) = requested else {
        return scratch.to_path_buf();
    };

    if requested.is_dir() {
        return requested.to_path_buf();
    }

    match fs::create_dir_all(requested) {
        Ok(()) => {
            debug!("Created working directory: {}", requested.display());
            requested.to_path_buf()
        }
        Err(e) => {
            warn!(
                "Cannot create working directory {} ({e}), falling back to {}",
                requested.display(),
                scratch.display()
            );
            scratch.to_path_buf()
        }
    }
}
