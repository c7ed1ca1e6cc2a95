//! Configuration file support for envmerge.
//!
//! This module provides:
//! - Loading configuration from `envmerge.toml`
//! - Config file discovery (search upward from current directory)
//! - Resolving CLI args, config file, and defaults into `Settings`
//! - Template generation with `--init`

mod file;
mod init;
mod settings;
mod toml_schema;

pub use file::{find_config_file, load_config, ConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, ENVMERGE_TOML_TEMPLATE};
pub use settings::{merge_settings, CliMergeOptions, Settings, SettingsError};
pub use toml_schema::{EnvMergeToml, MergeSection, PromptSection};
