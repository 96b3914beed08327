//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use kiln_config::{BuildSettings, SettingsDiscovery};
use tracing::debug;

use crate::error::Result;

/// Get the current working directory.
pub(crate) fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Resolve a path relative to the current directory.
///
/// Absolute paths are returned unchanged.
pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Resolve the `--root` option, defaulting to the current directory.
pub(crate) fn project_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    Ok(match root {
        Some(root) => resolve_path(root, &cwd),
        None => cwd,
    })
}

/// Discover and load build settings under `root`.
pub(crate) fn load_settings(root: &Path) -> Result<BuildSettings> {
    debug!(root = %root.display(), "discovering build settings");
    Ok(SettingsDiscovery::new(root).load()?)
}
