//! Validation issue types.
//!
//! Issue codes form a closed taxonomy. Every issue is recoverable by adjusting
//! the mapping; none is fatal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use wbs_model::SchemaPath;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the mapping
    Error,
    /// Should review
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Closed set of issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    IncompatibleDataType,
    MissingRequiredMapping,
    InvalidPropertyId,
    DuplicateLanguageMapping,
    DuplicatePropertyMapping,
    MissingStatementValue,
    InvalidLanguageCode,
    MissingItemConfiguration,
}

impl IssueCode {
    pub const fn all() -> &'static [Self] {
        &[
            Self::IncompatibleDataType,
            Self::MissingRequiredMapping,
            Self::InvalidPropertyId,
            Self::DuplicateLanguageMapping,
            Self::DuplicatePropertyMapping,
            Self::MissingStatementValue,
            Self::InvalidLanguageCode,
            Self::MissingItemConfiguration,
        ]
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncompatibleDataType => "INCOMPATIBLE_DATA_TYPE",
            Self::MissingRequiredMapping => "MISSING_REQUIRED_MAPPING",
            Self::InvalidPropertyId => "INVALID_PROPERTY_ID",
            Self::DuplicateLanguageMapping => "DUPLICATE_LANGUAGE_MAPPING",
            Self::DuplicatePropertyMapping => "DUPLICATE_PROPERTY_MAPPING",
            Self::MissingStatementValue => "MISSING_STATEMENT_VALUE",
            Self::InvalidLanguageCode => "INVALID_LANGUAGE_CODE",
            Self::MissingItemConfiguration => "MISSING_ITEM_CONFIGURATION",
        }
    }

    /// Short description for UI.
    pub fn description(&self) -> &'static str {
        match self {
            Self::IncompatibleDataType => "Column data does not fit the target",
            Self::MissingRequiredMapping => "A required slot has no usable mapping",
            Self::InvalidPropertyId => "Property id is missing or malformed",
            Self::DuplicateLanguageMapping => "Same term language mapped from two columns",
            Self::DuplicatePropertyMapping => "Same property mapped twice",
            Self::MissingStatementValue => "Statement has no value source",
            Self::InvalidLanguageCode => "Language code is missing or malformed",
            Self::MissingItemConfiguration => "Schema name or target instance missing",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation issue attached to one schema path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub path: SchemaPath,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, path: SchemaPath, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            path,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn warning(code: IssueCode, path: SchemaPath, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, path, message)
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: &str, value: impl ToString) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}: {}",
            self.severity.label(),
            self.code,
            self.path,
            self.message
        )
    }
}
