//! Storage type to semantic type compatibility table.
//!
//! The table is fixed configuration: storage types are grouped into families
//! and each family maps to a fixed list of semantic types. Lookup is
//! case-insensitive and ignores size/precision suffixes such as
//! `VARCHAR(255)` or `DECIMAL(10,2)`. Unknown storage types map to nothing.

use std::collections::BTreeSet;
use std::fmt;

use wbs_model::SemanticType;

/// A group of storage types sharing the same semantic targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageFamily {
    Text,
    Numeric,
    Temporal,
}

const TEXT_TYPES: &[&str] = &[
    "VARCHAR",
    "TEXT",
    "STRING",
    "CHAR",
    "NVARCHAR",
    "NCHAR",
    "CHARACTER",
    "CHARACTER VARYING",
    "CLOB",
];

const NUMERIC_TYPES: &[&str] = &[
    "INTEGER",
    "INT",
    "BIGINT",
    "SMALLINT",
    "TINYINT",
    "HUGEINT",
    "DECIMAL",
    "NUMERIC",
    "NUMBER",
    "FLOAT",
    "DOUBLE",
    "DOUBLE PRECISION",
    "REAL",
];

const TEMPORAL_TYPES: &[&str] = &["DATE", "DATETIME", "TIMESTAMP", "TIMESTAMPTZ"];

impl StorageFamily {
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Numeric, Self::Temporal]
    }

    /// Storage types belonging to this family, in canonical spelling.
    pub fn storage_types(&self) -> &'static [&'static str] {
        match self {
            Self::Text => TEXT_TYPES,
            Self::Numeric => NUMERIC_TYPES,
            Self::Temporal => TEMPORAL_TYPES,
        }
    }

    /// Semantic types this family can satisfy, in preference order.
    pub fn semantic_types(&self) -> &'static [SemanticType] {
        match self {
            Self::Text => &[
                SemanticType::String,
                SemanticType::MonolingualText,
                SemanticType::Url,
                SemanticType::ExternalId,
            ],
            Self::Numeric => &[SemanticType::Quantity],
            Self::Temporal => &[SemanticType::Time],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Temporal => "date/time",
        }
    }
}

impl fmt::Display for StorageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical spelling of a storage type: trimmed, uppercased, size suffix
/// removed, inner whitespace collapsed.
pub fn normalize_storage_type(raw: &str) -> String {
    let base = raw.split('(').next().unwrap_or(raw);
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Family of a storage type, if it is known.
pub fn storage_family(storage_type: &str) -> Option<StorageFamily> {
    let normalized = normalize_storage_type(storage_type);
    StorageFamily::all()
        .iter()
        .copied()
        .find(|family| family.storage_types().contains(&normalized.as_str()))
}

/// Semantic types a storage type can be mapped to. Total: unknown storage
/// types yield the empty set.
pub fn compatible_types(storage_type: &str) -> BTreeSet<SemanticType> {
    storage_family(storage_type)
        .map(|family| family.semantic_types().iter().copied().collect())
        .unwrap_or_default()
}

/// Storage families that can satisfy a semantic type.
pub fn families_for(semantic: SemanticType) -> Vec<StorageFamily> {
    StorageFamily::all()
        .iter()
        .copied()
        .filter(|family| family.semantic_types().contains(&semantic))
        .collect()
}
