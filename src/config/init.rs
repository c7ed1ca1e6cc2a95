//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template envmerge.toml with documentation
pub const ENVMERGE_TOML_TEMPLATE: &str = r##"# envmerge.toml - Configuration for envmerge
#
# envmerge rebuilds a customized .env file from a fresh template:
# - Template order, comments and blank lines are kept
# - Values you already set in the old file replace the template defaults
# - Variables the template no longer lists are appended at the end, sorted
#
# Command-line flags take precedence over the settings below.

[merge]
# Comment line written above variables that are missing from the template.
# Must start with '#'.
# extras_header = "# 示例文件中不存在的变量"

[prompt]
# Answer required before an existing output file is overwritten
# (case-insensitive).
# confirm_token = "yes"
"##;

/// Generate envmerge.toml in the specified directory (or current directory if None).
///
/// Returns an error if envmerge.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |d| d.join(CONFIG_FILE_NAME));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, ENVMERGE_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate envmerge.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
