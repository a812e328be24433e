//! Committed value mappings.

use serde::{Deserialize, Serialize};

use crate::{ColumnDescriptor, SchemaPath, SemanticType, TargetKind};

/// Where a mapped value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    Column,
    Constant,
    Expression,
}

/// Reference to a source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    pub column_name: String,
    pub storage_type: String,
}

/// Source of a mapping: a column reference or a literal/expression string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingSource {
    Column(ColumnSource),
    Literal(String),
}

/// The result of a committed drop (or a constant/expression entered by hand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueMapping {
    pub mapping_type: MappingType,
    pub source: MappingSource,
    /// Must be one of the target's accepted types.
    pub resolved_type: SemanticType,
}

impl ValueMapping {
    pub fn column(column: &ColumnDescriptor, resolved_type: SemanticType) -> Self {
        Self {
            mapping_type: MappingType::Column,
            source: MappingSource::Column(ColumnSource {
                column_name: column.name.clone(),
                storage_type: column.storage_type.clone(),
            }),
            resolved_type,
        }
    }

    pub fn constant(value: impl Into<String>, resolved_type: SemanticType) -> Self {
        Self {
            mapping_type: MappingType::Constant,
            source: MappingSource::Literal(value.into()),
            resolved_type,
        }
    }

    pub fn expression(expression: impl Into<String>, resolved_type: SemanticType) -> Self {
        Self {
            mapping_type: MappingType::Expression,
            source: MappingSource::Literal(expression.into()),
            resolved_type,
        }
    }

    /// Column name for column mappings.
    pub fn column_name(&self) -> Option<&str> {
        match &self.source {
            MappingSource::Column(source) => Some(&source.column_name),
            MappingSource::Literal(_) => None,
        }
    }

    /// True if the mapping provides a value: a non-blank column name for
    /// column mappings, a non-blank literal otherwise.
    pub fn has_source(&self) -> bool {
        match &self.source {
            MappingSource::Column(source) => !source.column_name.trim().is_empty(),
            MappingSource::Literal(value) => !value.trim().is_empty(),
        }
    }
}

/// Flat view of one mapping used for cross-mapping checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingInfo {
    pub path: SchemaPath,
    pub kind: TargetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
}

impl MappingInfo {
    pub fn term(
        kind: TargetKind,
        path: SchemaPath,
        language_code: impl Into<String>,
        column_name: Option<String>,
    ) -> Self {
        Self {
            path,
            kind,
            language_code: Some(language_code.into()),
            property_id: None,
            column_name,
        }
    }

    pub fn property(
        kind: TargetKind,
        path: SchemaPath,
        property_id: impl Into<String>,
        column_name: Option<String>,
    ) -> Self {
        Self {
            path,
            kind,
            language_code: None,
            property_id: Some(property_id.into()),
            column_name,
        }
    }
}
