//! Sink-side schema slots.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, SchemaPath, SemanticType};

/// Kind of slot a target represents in the item schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    TermLabel,
    TermDescription,
    TermAlias,
    StatementValue,
    QualifierValue,
    ReferenceValue,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TermLabel => "term-label",
            Self::TermDescription => "term-description",
            Self::TermAlias => "term-alias",
            Self::StatementValue => "statement-value",
            Self::QualifierValue => "qualifier-value",
            Self::ReferenceValue => "reference-value",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TermLabel => "Label",
            Self::TermDescription => "Description",
            Self::TermAlias => "Alias",
            Self::StatementValue => "Statement",
            Self::QualifierValue => "Qualifier",
            Self::ReferenceValue => "Reference",
        }
    }

    /// Labels, descriptions and aliases: these carry a language code.
    pub fn is_term(&self) -> bool {
        matches!(
            self,
            Self::TermLabel | Self::TermDescription | Self::TermAlias
        )
    }

    /// Statements, qualifiers and references: these carry a property id.
    pub fn is_property_kind(&self) -> bool {
        !self.is_term()
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "term-label" | "label" => Ok(Self::TermLabel),
            "term-description" | "description" => Ok(Self::TermDescription),
            "term-alias" | "alias" => Ok(Self::TermAlias),
            "statement-value" | "statement" => Ok(Self::StatementValue),
            "qualifier-value" | "qualifier" => Ok(Self::QualifierValue),
            "reference-value" | "reference" => Ok(Self::ReferenceValue),
            _ => Err(ModelError::UnknownTargetKind(s.to_string())),
        }
    }
}

/// One addressable slot in the destination schema that can receive a mapping.
///
/// Targets come from schema configuration and the remote constraint lookup.
/// Language codes and property ids are kept as raw strings so that malformed
/// configuration surfaces as a validation issue instead of a load failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTarget {
    pub kind: TargetKind,
    pub path: SchemaPath,
    /// Accepted semantic types. An empty set means nothing can be dropped here.
    #[serde(default)]
    pub accepted_types: BTreeSet<SemanticType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    /// Display label of the property or term slot, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SchemaTarget {
    /// Create a term target (label, description or alias) for a language.
    pub fn term(kind: TargetKind, path: SchemaPath, language_code: impl Into<String>) -> Self {
        debug_assert!(kind.is_term());
        Self {
            kind,
            path,
            accepted_types: [SemanticType::String, SemanticType::MonolingualText]
                .into_iter()
                .collect(),
            language_code: Some(language_code.into()),
            property_id: None,
            is_required: false,
            label: None,
        }
    }

    /// Create a statement, qualifier or reference target for a property.
    pub fn property<I>(
        kind: TargetKind,
        path: SchemaPath,
        property_id: impl Into<String>,
        accepted: I,
    ) -> Self
    where
        I: IntoIterator<Item = SemanticType>,
    {
        debug_assert!(kind.is_property_kind());
        Self {
            kind,
            path,
            accepted_types: accepted.into_iter().collect(),
            language_code: None,
            property_id: Some(property_id.into()),
            is_required: false,
            label: None,
        }
    }

    #[must_use]
    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    #[must_use]
    pub fn with_accepted<I>(mut self, accepted: I) -> Self
    where
        I: IntoIterator<Item = SemanticType>,
    {
        self.accepted_types = accepted.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn without_property(mut self) -> Self {
        self.property_id = None;
        self
    }

    /// Text used when ranking targets for a column: the label if known,
    /// otherwise the last path segment.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.path.leaf_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert!(TargetKind::TermAlias.is_term());
        assert!(TargetKind::QualifierValue.is_property_kind());
        assert_eq!(
            "Statement_Value".parse::<TargetKind>().unwrap(),
            TargetKind::StatementValue
        );
    }

    #[test]
    fn deserializes_from_camel_case() {
        let json = r#"{
            "kind": "statement-value",
            "path": "item.statements[0].value",
            "acceptedTypes": ["quantity"],
            "propertyId": "P2067",
            "isRequired": true
        }"#;
        let target: SchemaTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.kind, TargetKind::StatementValue);
        assert!(target.accepted_types.contains(&SemanticType::Quantity));
        assert_eq!(target.property_id.as_deref(), Some("P2067"));
        assert!(target.is_required);
        assert_eq!(target.display_name(), "value");
    }

    #[test]
    fn missing_accepted_types_is_tolerated() {
        let json = r#"{"kind":"statement-value","path":"item.statements[0].value"}"#;
        let target: SchemaTarget = serde_json::from_str(json).unwrap();
        assert!(target.accepted_types.is_empty());
        assert!(target.property_id.is_none());
    }

    #[test]
    fn invalid_path_fails_to_load() {
        let json = r#"{"kind":"term-label","path":"item..labels"}"#;
        assert!(serde_json::from_str::<SchemaTarget>(json).is_err());
    }
}
