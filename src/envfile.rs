//! Line-oriented `KEY=VALUE` file parsing and writing.
//!
//! Every physical line is kept so that comments, blank lines and anything
//! that does not look like an assignment can be re-emitted verbatim.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A recognized `KEY=VALUE` assignment (both sides trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

/// One physical line of a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine {
    /// Original text including its line terminator, if it had one
    pub raw: String,
    /// `None` for comments, blank lines and malformed lines
    pub assignment: Option<Assignment>,
}

impl ConfigLine {
    /// Classify a single raw line.
    pub fn classify(raw: &str) -> Self {
        let stripped = raw.trim();
        let assignment = if stripped.is_empty() || stripped.starts_with('#') {
            None
        } else {
            stripped.split_once('=').map(|(key, value)| Assignment {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            })
        };

        Self {
            raw: raw.to_string(),
            assignment,
        }
    }

    pub fn is_assignment(&self) -> bool {
        self.assignment.is_some()
    }
}

/// Parsed config file: ordered lines plus a key lookup.
#[derive(Debug, Default, Clone)]
pub struct ConfigFile {
    lines: Vec<ConfigLine>,
    values: HashMap<String, String>,
    shadowed: usize,
}

impl ConfigFile {
    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Effective value of `key`. The last assignment in the file wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of assignments hidden by a later assignment to the same key.
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }
}

/// Parse in-memory text.
///
/// Lines end at `\n` only. A `\r\n` terminator stays in the raw line (and
/// is trimmed from values), while a lone `\r` (classic Mac OS) is not a line
/// break: `A=1\rB=2\n` is one assignment whose value is `1\rB=2`.
pub fn parse_str(content: &str) -> ConfigFile {
    let mut file = ConfigFile::default();

    for raw in content.split_inclusive('\n') {
        let line = ConfigLine::classify(raw);
        if let Some(assignment) = &line.assignment {
            let previous = file
                .values
                .insert(assignment.key.clone(), assignment.value.clone());
            if previous.is_some() {
                file.shadowed += 1;
            }
        }
        file.lines.push(line);
    }

    file
}

/// Parse the file at `path`.
///
/// A path that does not exist parses as an empty file, so a missing prior
/// file behaves like one with no customizations.
pub fn parse(path: &Path) -> io::Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "file not found, treating as empty");
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)?;
    let file = parse_str(&content);

    tracing::debug!(
        path = %path.display(),
        lines = file.lines.len(),
        keys = file.len(),
        "parsed"
    );
    if file.shadowed > 0 {
        tracing::debug!(
            path = %path.display(),
            shadowed = file.shadowed,
            "duplicate keys, last assignment wins"
        );
    }

    Ok(file)
}

/// Write `lines` to `path` in order, creating or truncating it.
///
/// Not atomic: a failure part-way leaves a partially written file.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
    }
    writer.flush()
}
