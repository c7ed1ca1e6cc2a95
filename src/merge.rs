//! Template/prior merge.
//!
//! The template decides structure, order and comments. Values come from the
//! prior file where it has them. Keys only the prior file knows about are
//! appended at the end, sorted, below a separator comment.

use std::io;
use std::path::Path;

use crate::envfile::{self, ConfigFile};

/// Separator comment placed above variables the template does not declare.
pub const DEFAULT_EXTRAS_HEADER: &str = "# 示例文件中不存在的变量";

/// Result of merging a template with a prior file.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// Output lines, each carrying its own terminator
    pub lines: Vec<String>,
    pub report: MergeReport,
}

impl Merged {
    pub fn content(&self) -> String {
        self.lines.concat()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeReport {
    /// Template assignment lines that took their value from the prior file
    pub overridden: usize,
    /// Template assignment lines that kept the template default
    pub defaults: usize,
    /// Prior-only keys appended at the end, in output order
    pub extras: Vec<String>,
}

/// Merge two parsed files.
pub fn merge_files(template: &ConfigFile, prior: &ConfigFile, extras_header: &str) -> Merged {
    let mut lines = Vec::with_capacity(template.lines().len());
    let mut report = MergeReport::default();

    for line in template.lines() {
        let Some(assignment) = &line.assignment else {
            lines.push(line.raw.clone());
            continue;
        };

        let value = match prior.get(&assignment.key) {
            Some(value) => {
                report.overridden += 1;
                value
            }
            None => {
                report.defaults += 1;
                assignment.value.as_str()
            }
        };
        lines.push(format!("{}={}\n", assignment.key, value));
    }

    let mut extras: Vec<&str> = prior
        .keys()
        .filter(|key| !template.contains_key(key))
        .collect();
    extras.sort_unstable();

    if !extras.is_empty() {
        lines.push(format!("\n{extras_header}\n"));
        for key in &extras {
            let value = prior.get(key).unwrap_or_default();
            lines.push(format!("{key}={value}\n"));
        }
    }
    report.extras = extras.into_iter().map(str::to_string).collect();

    tracing::debug!(
        overridden = report.overridden,
        defaults = report.defaults,
        extras = report.extras.len(),
        "merged"
    );

    Merged { lines, report }
}

/// Parse both paths and merge them.
pub fn merge(template_path: &Path, prior_path: &Path, extras_header: &str) -> io::Result<Merged> {
    let template = envfile::parse(template_path)?;
    let prior = envfile::parse(prior_path)?;
    Ok(merge_files(&template, &prior, extras_header))
}
