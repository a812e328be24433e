//! Term sample length limits.
//!
//! Only the column's sample values are checked. Lengths are counted in
//! characters, not bytes.

use wbs_model::{ColumnDescriptor, SchemaTarget, TargetKind, ValidationOptions};

use crate::issue::{IssueCode, ValidationIssue};

pub(super) fn check(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> Option<ValidationIssue> {
    if !options.check_sample_lengths {
        return None;
    }
    let max_length = max_length_for(target.kind, options)?;
    let actual_length = column.max_sample_length()?;
    if actual_length <= max_length {
        return None;
    }

    let exceeded_count = column
        .sample_values
        .iter()
        .filter(|value| value.chars().count() > max_length)
        .count();

    Some(
        ValidationIssue::error(
            IssueCode::IncompatibleDataType,
            target.path.clone(),
            format!(
                "{} values must be shorter than {max_length} characters \
                 (longest sample in '{}' has {actual_length})",
                target.kind.label(),
                column.name
            ),
        )
        .with_context("columnName", &column.name)
        .with_context("maxLength", max_length)
        .with_context("actualLength", actual_length)
        .with_context("exceededCount", exceeded_count),
    )
}

fn max_length_for(kind: TargetKind, options: &ValidationOptions) -> Option<usize> {
    match kind {
        TargetKind::TermLabel => Some(options.label_max_length),
        TargetKind::TermDescription => Some(options.description_max_length),
        TargetKind::TermAlias => Some(options.alias_max_length),
        TargetKind::StatementValue | TargetKind::QualifierValue | TargetKind::ReferenceValue => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_model::SchemaPath;

    fn term(kind: TargetKind) -> SchemaTarget {
        SchemaTarget::term(kind, SchemaPath::parse("item.terms.labels.en").unwrap(), "en")
    }

    #[test]
    fn label_over_limit() {
        let column = ColumnDescriptor::new("title", "TEXT").with_samples(["a".repeat(300), "ok".into()]);
        let issue = check(&column, &term(TargetKind::TermLabel), &ValidationOptions::default()).unwrap();
        assert!(issue.message.contains("shorter than 250 characters"));
        assert_eq!(issue.context_value("maxLength"), Some("250"));
        assert_eq!(issue.context_value("actualLength"), Some("300"));
        assert_eq!(issue.context_value("exceededCount"), Some("1"));
    }

    #[test]
    fn limit_is_inclusive() {
        let column = ColumnDescriptor::new("alias", "TEXT").with_samples(["b".repeat(100)]);
        assert!(check(&column, &term(TargetKind::TermAlias), &ValidationOptions::default()).is_none());
        let column = ColumnDescriptor::new("alias", "TEXT").with_samples(["b".repeat(101)]);
        assert!(check(&column, &term(TargetKind::TermAlias), &ValidationOptions::default()).is_some());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 250 two-byte characters are within the label limit.
        let column = ColumnDescriptor::new("title", "TEXT").with_samples(["é".repeat(250)]);
        assert!(check(&column, &term(TargetKind::TermLabel), &ValidationOptions::default()).is_none());
    }

    #[test]
    fn custom_limits_and_toggle() {
        let column = ColumnDescriptor::new("d", "TEXT").with_samples(["c".repeat(60)]);
        let options = ValidationOptions::default().with_description_max_length(50);
        let issue = check(&column, &term(TargetKind::TermDescription), &options).unwrap();
        assert!(issue.message.starts_with("Description values must be shorter than 50 characters"));
        let options = options.with_sample_length_checks(false);
        assert!(check(&column, &term(TargetKind::TermDescription), &options).is_none());
    }
}
