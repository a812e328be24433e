//! Property id and language code checks.
//!
//! Statement, qualifier and reference targets must name a property; term
//! targets must name a language. A property target with no property id at all
//! fails before any other rule.

use wbs_model::{ColumnDescriptor, SchemaTarget, is_valid_language_code, is_valid_property_id};

use crate::issue::{IssueCode, ValidationIssue};

pub(super) fn check(column: &ColumnDescriptor, target: &SchemaTarget) -> Option<ValidationIssue> {
    if target.kind.is_term() {
        check_language(column, target)
    } else {
        check_property(column, target)
    }
}

/// Property targets without a property id.
pub(super) fn check_presence(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
) -> Option<ValidationIssue> {
    if target.kind.is_term() || !is_missing(target.property_id.as_deref()) {
        return None;
    }
    check_property(column, target)
}

fn is_missing(property_id: Option<&str>) -> bool {
    property_id.is_none_or(|id| id.trim().is_empty())
}

fn check_property(column: &ColumnDescriptor, target: &SchemaTarget) -> Option<ValidationIssue> {
    let message = match target.property_id.as_deref().filter(|id| !id.trim().is_empty()) {
        None => format!("{} target has no property id", target.kind.label()),
        Some(id) if !is_valid_property_id(id) => {
            format!("'{id}' is not a valid property id (expected P followed by digits)")
        }
        Some(_) => return None,
    };

    let mut issue = ValidationIssue::error(IssueCode::InvalidPropertyId, target.path.clone(), message)
        .with_context("columnName", &column.name)
        .with_context("targetKind", target.kind);
    if let Some(id) = &target.property_id {
        issue = issue.with_context("propertyId", id);
    }
    Some(issue)
}

fn check_language(column: &ColumnDescriptor, target: &SchemaTarget) -> Option<ValidationIssue> {
    let message = match target.language_code.as_deref() {
        None | Some("") => format!("{} target has no language code", target.kind.label()),
        Some(code) if !is_valid_language_code(code) => {
            format!("'{code}' is not a valid language code")
        }
        Some(_) => return None,
    };

    let mut issue =
        ValidationIssue::error(IssueCode::InvalidLanguageCode, target.path.clone(), message)
            .with_context("columnName", &column.name)
            .with_context("targetKind", target.kind);
    if let Some(code) = &target.language_code {
        issue = issue.with_context("languageCode", code);
    }
    Some(issue)
}
