use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a merge run.
#[derive(Debug, Error)]
pub enum EnvMergeError {
    #[error("template file does not exist: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("prior file does not exist: {}", .0.display())]
    PriorMissing(PathBuf),

    #[error("prior file and output file must not have the same name: {0}")]
    SameFile(String),

    #[error("{} already exists and was left untouched", .0.display())]
    Cancelled(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] io::Error),
}

impl EnvMergeError {
    /// Cancellation is a user decision rather than a failure, but still
    /// exits non-zero.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, EnvMergeError::Cancelled(_))
    }
}
