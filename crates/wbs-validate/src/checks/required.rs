//! Nullable columns cannot satisfy required targets.

use wbs_model::{ColumnDescriptor, SchemaTarget, ValidationOptions};

use crate::issue::{IssueCode, ValidationIssue};

pub(super) fn check(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> Option<ValidationIssue> {
    if !options.require_non_nullable_for_required || !target.is_required || !column.nullable {
        return None;
    }

    Some(
        ValidationIssue::error(
            IssueCode::MissingRequiredMapping,
            target.path.clone(),
            format!(
                "{} is required but column '{}' may contain empty values",
                target.display_name(),
                column.name
            ),
        )
        .with_context("columnName", &column.name)
        .with_context("targetKind", target.kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_model::{SchemaPath, TargetKind};

    fn required_label() -> SchemaTarget {
        SchemaTarget::term(
            TargetKind::TermLabel,
            SchemaPath::parse("item.terms.labels.en").unwrap(),
            "en",
        )
        .required(true)
    }

    #[test]
    fn nullable_on_required_fails() {
        let column = ColumnDescriptor::new("title", "VARCHAR").with_nullable(true);
        let issue = check(&column, &required_label(), &ValidationOptions::default()).unwrap();
        assert_eq!(issue.code, IssueCode::MissingRequiredMapping);
        assert_eq!(issue.context_value("targetKind"), Some("term-label"));
    }

    #[test]
    fn lenient_options_skip_rule() {
        let column = ColumnDescriptor::new("title", "VARCHAR").with_nullable(true);
        assert!(check(&column, &required_label(), &ValidationOptions::lenient()).is_none());
    }

    #[test]
    fn optional_target_accepts_nullable() {
        let column = ColumnDescriptor::new("title", "VARCHAR").with_nullable(true);
        let target = required_label().required(false);
        assert!(check(&column, &target, &ValidationOptions::default()).is_none());
    }
}
