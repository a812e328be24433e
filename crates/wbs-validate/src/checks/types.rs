//! Storage type compatibility.

use wbs_model::{ColumnDescriptor, SchemaTarget};

use crate::issue::{IssueCode, ValidationIssue};
use crate::resolver::{explain, is_compatible};

pub(super) fn check(column: &ColumnDescriptor, target: &SchemaTarget) -> Option<ValidationIssue> {
    if is_compatible(&column.storage_type, &target.accepted_types) {
        return None;
    }

    let accepted = target
        .accepted_types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(",");

    Some(
        ValidationIssue::error(
            IssueCode::IncompatibleDataType,
            target.path.clone(),
            explain(&column.storage_type, &target.accepted_types),
        )
        .with_context("columnName", &column.name)
        .with_context("storageType", &column.storage_type)
        .with_context("acceptedTypes", accepted),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_model::{SchemaPath, SemanticType, TargetKind};

    #[test]
    fn integer_on_string_target() {
        let column = ColumnDescriptor::new("age", "INTEGER");
        let target = SchemaTarget::property(
            TargetKind::StatementValue,
            SchemaPath::parse("item.statements[0].value").unwrap(),
            "P31",
            [SemanticType::String],
        );
        let issue = check(&column, &target).unwrap();
        assert_eq!(issue.code, IssueCode::IncompatibleDataType);
        assert_eq!(issue.context_value("acceptedTypes"), Some("string"));
        assert_eq!(issue.context_value("storageType"), Some("INTEGER"));
    }

    #[test]
    fn empty_accepted_set_is_never_compatible() {
        let column = ColumnDescriptor::new("title", "TEXT");
        let target = SchemaTarget::property(
            TargetKind::QualifierValue,
            SchemaPath::parse("item.statements[0].qualifiers[0]").unwrap(),
            "P580",
            [],
        );
        assert!(check(&column, &target).is_some());
    }
}
