//! Loading configuration from `.gitsweeper.toml` files.

use super::SweepConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-repository config file name, at the working tree root.
pub const REPO_CONFIG_FILE: &str = ".gitsweeper.toml";

/// Directory name under the user config dir.
const APP_DIR: &str = "gitsweeper";

/// Global config file name.
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Path of the per-repository config file.
pub fn repo_config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(REPO_CONFIG_FILE)
}

/// Path of the user's global config file, if a config dir exists.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Load configuration for the repository at `repo_root`.
///
/// The repository file wins over the global one. Returns defaults if
/// neither exists; a file that exists but cannot be parsed is an error.
pub fn load_config(repo_root: &Path) -> Result<SweepConfig> {
    let candidates = std::iter::once(repo_config_path(repo_root)).chain(global_config_path());

    for path in candidates {
        if let Some(config) = read_config_file(&path)? {
            debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }
    }

    Ok(SweepConfig::default())
}

fn read_config_file(path: &Path) -> Result<Option<SweepConfig>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: SweepConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    Ok(Some(config))
}
