//! TOML schema definitions for envmerge.toml

use serde::{Deserialize, Serialize};

/// Root structure for envmerge.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvMergeToml {
    #[serde(default)]
    pub merge: MergeSection,

    #[serde(default)]
    pub prompt: PromptSection,
}

/// `[merge]` section
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeSection {
    /// Comment line placed above variables missing from the template
    pub extras_header: Option<String>,
}

/// `[prompt]` section
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptSection {
    /// Answer that confirms overwriting an existing output file
    pub confirm_token: Option<String>,
}
