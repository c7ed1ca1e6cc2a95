//! Config file discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::toml_schema::EnvMergeToml;

pub const CONFIG_FILE_NAME: &str = "envmerge.toml";

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Search upward from `start_dir` for `envmerge.toml`.
///
/// Stops at the first match, or at the git repository root (directory
/// containing `.git`), whichever comes first.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        if current.join(".git").exists() || !current.pop() {
            return None;
        }
    }
}

/// Load and parse envmerge.toml from the given path.
pub fn load_config(path: &Path) -> Result<EnvMergeToml, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EnvMergeToml = toml::from_str(&content)?;
    Ok(config)
}
