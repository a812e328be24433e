//! Structural locators into the schema tree.
//!
//! Paths travel as plain strings in the persisted format
//! (`item.terms.labels.en`, `item.statements[2].qualifiers[0]`), so they are
//! kept opaque. Construction validates them against a small grammar so that
//! near-miss spellings (`a[01]`, `a..b`, trailing whitespace) cannot silently
//! become distinct ledger keys.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ModelError;

const SEGMENT_NAME: &str = r"[A-Za-z_][A-Za-z0-9_-]*";
const INDEX: &str = r"\[(?:0|[1-9][0-9]*)\]";

static PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let segment = format!("{SEGMENT_NAME}(?:{INDEX})*");
    Regex::new(&format!(r"^{segment}(?:\.{segment})*$")).expect("schema path regex")
});

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{SEGMENT_NAME}$")).expect("segment name regex"));

/// A validated schema path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaPath(String);

impl SchemaPath {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.is_empty() {
            return Err(ModelError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty",
            });
        }
        if !PATH_REGEX.is_match(raw) {
            return Err(ModelError::InvalidPath {
                path: raw.to_string(),
                reason: "expected dot-separated names with optional [index] suffixes",
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` can stand as one named segment.
    pub fn is_segment_name(name: &str) -> bool {
        NAME_REGEX.is_match(name)
    }

    /// Append a named segment.
    pub fn child(&self, name: &str) -> Result<Self, ModelError> {
        if !Self::is_segment_name(name) {
            return Err(ModelError::InvalidPath {
                path: format!("{}.{name}", self.0),
                reason: "invalid segment name",
            });
        }
        Ok(Self(format!("{}.{name}", self.0)))
    }

    /// Append an array index to the last segment.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Append a named segment, or return `self` unchanged if `name` is not a
    /// valid segment. Used where user-supplied keys (language codes) become
    /// path segments and an invalid key is reported at the parent.
    #[must_use]
    pub fn child_or_self(&self, name: &str) -> Self {
        self.child(name).unwrap_or_else(|_| self.clone())
    }

    /// The path without its last dotted segment, if any.
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('.').map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Dotted segments including their index suffixes.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Last segment name with any index suffix removed.
    pub fn leaf_name(&self) -> &str {
        let last = self.0.rsplit('.').next().unwrap_or(&self.0);
        last.split('[').next().unwrap_or(last)
    }

    /// True if `self` equals `other` or lies beneath it.
    pub fn starts_with(&self, other: &SchemaPath) -> bool {
        self.0 == other.0
            || (self.0.starts_with(&other.0)
                && matches!(self.0.as_bytes().get(other.0.len()), Some(b'.' | b'[')))
    }
}

impl std::str::FromStr for SchemaPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SchemaPath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SchemaPath> for String {
    fn from(path: SchemaPath) -> Self {
        path.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
