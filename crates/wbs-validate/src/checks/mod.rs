//! Mapping validator.
//!
//! Each module performs one rule. Rules run in order and the first failure
//! wins, so a call reports at most one issue.

mod identifier;
mod length;
mod required;
mod types;

use serde::Serialize;
use tracing::trace;
use wbs_model::{ColumnDescriptor, SchemaTarget, ValidationOptions};

use crate::issue::ValidationIssue;

/// Positive feedback text for a valid mapping.
pub const COMPATIBLE_MAPPING_MESSAGE: &str = "Compatible mapping";

/// Outcome of validating one column against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<ValidationIssue>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issue: None,
        }
    }

    pub fn invalid(issue: ValidationIssue) -> Self {
        Self {
            is_valid: false,
            issue: Some(issue),
        }
    }

    fn from_issue(issue: Option<ValidationIssue>) -> Self {
        issue.map_or_else(Self::valid, Self::invalid)
    }

    /// Feedback text: the issue message, or the positive text when valid.
    pub fn message(&self) -> &str {
        self.issue
            .as_ref()
            .map_or(COMPATIBLE_MAPPING_MESSAGE, |issue| issue.message.as_str())
    }
}

/// Validate a column against a target with every rule.
pub fn validate(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> ValidationResult {
    let issue = structural_issue(column, target, options)
        // 4. Sample lengths against term limits
        .or_else(|| length::check(column, target, options));
    trace!(
        column = %column.name,
        target = %target.path,
        valid = issue.is_none(),
        "validated mapping"
    );
    ValidationResult::from_issue(issue)
}

/// Validate with the rules that do not depend on sample data.
///
/// Used when a column is picked up to decide which targets light up.
pub fn validate_for_pickup(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> ValidationResult {
    ValidationResult::from_issue(structural_issue(column, target, options))
}

fn structural_issue(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> Option<ValidationIssue> {
    // A property target without a property id accepts nothing
    identifier::check_presence(column, target)
        // 1. Storage type compatibility
        .or_else(|| types::check(column, target))
        // 2. Nullable columns on required targets
        .or_else(|| required::check(column, target, options))
        // 3. Property id / language code presence and syntax
        .or_else(|| identifier::check(column, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueCode;
    use wbs_model::{SchemaPath, SemanticType, TargetKind};

    fn label_target() -> SchemaTarget {
        SchemaTarget::term(
            TargetKind::TermLabel,
            SchemaPath::parse("item.terms.labels.en").unwrap(),
            "en",
        )
    }

    #[test]
    fn first_failing_rule_wins() {
        // Incompatible and nullable on a required target: only the type issue.
        let column = ColumnDescriptor::new("count", "INTEGER").with_nullable(true);
        let target = label_target().required(true);
        let result = validate(&column, &target, &ValidationOptions::default());
        assert!(!result.is_valid);
        assert_eq!(
            result.issue.unwrap().code,
            IssueCode::IncompatibleDataType
        );
    }

    #[test]
    fn valid_result_uses_positive_message() {
        let column = ColumnDescriptor::new("title", "VARCHAR");
        let result = validate(&column, &label_target(), &ValidationOptions::default());
        assert!(result.is_valid);
        assert_eq!(result.message(), COMPATIBLE_MAPPING_MESSAGE);
    }

    #[test]
    fn pickup_ignores_sample_lengths() {
        let column = ColumnDescriptor::new("title", "TEXT").with_samples(["x".repeat(400)]);
        let options = ValidationOptions::default();
        assert!(validate_for_pickup(&column, &label_target(), &options).is_valid);
        assert!(!validate(&column, &label_target(), &options).is_valid);
    }

    #[test]
    fn validation_is_idempotent() {
        let column = ColumnDescriptor::new("mass", "DOUBLE").with_nullable(true);
        let target = SchemaTarget::property(
            TargetKind::StatementValue,
            SchemaPath::parse("item.statements[0].value").unwrap(),
            "P2067",
            [SemanticType::Quantity],
        )
        .required(true);
        let options = ValidationOptions::default();
        let first = validate(&column, &target, &options);
        let second = validate(&column, &target, &options);
        assert_eq!(first, second);
        assert_eq!(
            first.issue.unwrap().code,
            IssueCode::MissingRequiredMapping
        );
    }
}
