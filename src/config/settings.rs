//! Settings resolution
//!
//! Priority: CLI args > envmerge.toml > defaults

use thiserror::Error;

use crate::confirm::DEFAULT_CONFIRM_TOKEN;
use crate::merge::DEFAULT_EXTRAS_HEADER;

use super::toml_schema::EnvMergeToml;

/// CLI options that can override config file settings.
///
/// `None` means "not given on the command line".
#[derive(Debug, Default)]
pub struct CliMergeOptions {
    pub extras_header: Option<String>,
    pub confirm_token: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub extras_header: String,
    pub confirm_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extras_header: DEFAULT_EXTRAS_HEADER.to_string(),
            confirm_token: DEFAULT_CONFIRM_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The header must re-parse as a comment, otherwise merging the output
    /// again would turn it into a pass-through line or an extra key.
    #[error("extras header must be a single '#' comment line, got {0:?}")]
    InvalidExtrasHeader(String),

    #[error("confirm token must not be empty")]
    EmptyConfirmToken,
}

/// Merge configurations from CLI, TOML, and defaults.
pub fn merge_settings(
    cli: &CliMergeOptions,
    toml: Option<&EnvMergeToml>,
) -> Result<Settings, SettingsError> {
    let defaults = Settings::default();

    let extras_header = cli
        .extras_header
        .clone()
        .or_else(|| toml.and_then(|t| t.merge.extras_header.clone()))
        .unwrap_or(defaults.extras_header);
    let confirm_token = cli
        .confirm_token
        .clone()
        .or_else(|| toml.and_then(|t| t.prompt.confirm_token.clone()))
        .unwrap_or(defaults.confirm_token);

    if !extras_header.trim_start().starts_with('#') || extras_header.contains('\n') {
        return Err(SettingsError::InvalidExtrasHeader(extras_header));
    }
    let confirm_token = confirm_token.trim().to_string();
    if confirm_token.is_empty() {
        return Err(SettingsError::EmptyConfirmToken);
    }

    Ok(Settings {
        extras_header,
        confirm_token,
    })
}
