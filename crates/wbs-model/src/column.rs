//! Source-side column descriptors.

use serde::{Deserialize, Serialize};

/// One attribute of the source table, as reported by ingestion.
///
/// Descriptors are immutable once produced; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name, unique within its table.
    pub name: String,
    /// Storage type reported by the source (e.g. "VARCHAR", "INTEGER").
    /// Compared case-insensitively.
    pub storage_type: String,
    /// Ordered sample of raw values. May be empty.
    #[serde(default)]
    pub sample_values: Vec<String>,
    /// Whether the column may contain nulls.
    #[serde(default)]
    pub nullable: bool,
    /// Number of distinct values, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<u64>,
}

impl ColumnDescriptor {
    /// Create a non-nullable column with no sample values.
    pub fn new(name: impl Into<String>, storage_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_type: storage_type.into(),
            sample_values: Vec::new(),
            nullable: false,
            unique_count: None,
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_values = samples.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_unique_count(mut self, count: u64) -> Self {
        self.unique_count = Some(count);
        self
    }

    /// Length in characters of the longest sample value, if any.
    pub fn max_sample_length(&self) -> Option<usize> {
        self.sample_values.iter().map(|v| v.chars().count()).max()
    }
}
