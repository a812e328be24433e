//! Feedback for the rendering layer while a column is dragged.

use serde::Serialize;
use wbs_model::{ColumnDescriptor, SchemaTarget, SemanticType, TargetKind, ValidationOptions};
use wbs_validate::{
    IssueCode, StorageFamily, ValidationIssue, ValidationResult, families_for, validate,
};

/// Visual tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Positive,
    Negative,
}

/// Message shown next to a hovered target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFeedback {
    pub tone: FeedbackTone,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<IssueCode>,
}

/// Validate dropping `column` on `target` with every rule.
pub fn validate_drag_operation(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> ValidationResult {
    validate(column, target, options)
}

/// Feedback text for a validation result.
pub fn validation_feedback(result: &ValidationResult) -> ValidationFeedback {
    ValidationFeedback {
        tone: if result.is_valid {
            FeedbackTone::Positive
        } else {
            FeedbackTone::Negative
        },
        message: result.message().to_string(),
        code: result.issue.as_ref().map(|issue| issue.code),
    }
}

/// Actionable suggestions for fixing a failed validation. Empty when valid.
pub fn validation_suggestions(result: &ValidationResult, target: &SchemaTarget) -> Vec<String> {
    let Some(issue) = &result.issue else {
        return Vec::new();
    };

    match issue.code {
        IssueCode::IncompatibleDataType if issue.context_value("maxLength").is_some() => {
            length_suggestions(issue, target)
        }
        IssueCode::IncompatibleDataType => type_suggestions(target),
        IssueCode::MissingRequiredMapping => vec![
            "Choose a column that never contains empty values".to_string(),
            "Or fill the empty values in the source before mapping".to_string(),
        ],
        IssueCode::InvalidPropertyId => {
            vec!["Select a property for this slot before mapping a column".to_string()]
        }
        IssueCode::InvalidLanguageCode => {
            vec!["Pick a language code such as 'en', 'de' or 'zh-hant'".to_string()]
        }
        IssueCode::DuplicateLanguageMapping => vec![
            "Remove the existing mapping for this language first".to_string(),
            "Or map this column as an alias instead".to_string(),
        ],
        IssueCode::DuplicatePropertyMapping => {
            vec!["Add the value as a qualifier of the existing statement".to_string()]
        }
        IssueCode::MissingStatementValue | IssueCode::MissingItemConfiguration => Vec::new(),
    }
}

fn type_suggestions(target: &SchemaTarget) -> Vec<String> {
    if target.accepted_types.is_empty() {
        return vec!["This slot does not accept column data".to_string()];
    }

    let mut families: Vec<StorageFamily> = target
        .accepted_types
        .iter()
        .flat_map(|ty| families_for(*ty))
        .collect();
    families.sort();
    families.dedup();

    if families.is_empty() {
        let accepted = join_labels(target.accepted_types.iter().copied());
        return vec![format!(
            "{accepted} values cannot come from a column; enter a constant instead"
        )];
    }

    families
        .iter()
        .map(|family| {
            format!(
                "Use a {family} column ({})",
                family.storage_types().iter().take(3).copied().collect::<Vec<_>>().join(", ")
            )
        })
        .collect()
}

fn length_suggestions(issue: &ValidationIssue, target: &SchemaTarget) -> Vec<String> {
    let max = issue.context_value("maxLength").unwrap_or_default();
    let mut suggestions = vec![format!("Shorten the source values to at most {max} characters")];
    if target.kind.is_term() && target.kind != TargetKind::TermDescription {
        suggestions.push("Map long text to a description instead".to_string());
    }
    suggestions
}

fn join_labels(types: impl Iterator<Item = SemanticType>) -> String {
    types.map(|t| t.label()).collect::<Vec<_>>().join(", ")
}
