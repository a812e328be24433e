//! Cross-mapping duplicate detection.
//!
//! A candidate mapping is compared against the existing ones with a single
//! linear scan. Issues are reported at the candidate's path, one per
//! conflicting existing mapping.

use tracing::debug;
use wbs_model::{MappingInfo, SchemaPath, TargetKind};

use crate::issue::{IssueCode, ValidationIssue};

/// Find mappings in `existing` that conflict with `candidate`.
///
/// - Term mappings conflict when kind, language and path match but the source
///   columns differ.
/// - Statement mappings conflict when they name the same property at another
///   path. Qualifier and reference mappings conflict the same way, but only
///   within the statement or reference that holds them.
pub fn detect_invalid_mappings(
    existing: &[MappingInfo],
    candidate: &MappingInfo,
) -> Vec<ValidationIssue> {
    let issues: Vec<ValidationIssue> = if candidate.kind.is_term() {
        existing
            .iter()
            .filter(|other| is_language_duplicate(other, candidate))
            .map(|other| language_issue(other, candidate))
            .collect()
    } else {
        existing
            .iter()
            .filter(|other| is_property_duplicate(other, candidate))
            .map(|other| property_issue(other, candidate))
            .collect()
    };

    if !issues.is_empty() {
        debug!(
            path = %candidate.path,
            conflicts = issues.len(),
            "duplicate mappings detected"
        );
    }
    issues
}

/// Check every mapping against the ones before it, so each conflicting pair
/// is reported once at the later path.
pub fn detect_all(infos: &[MappingInfo]) -> Vec<ValidationIssue> {
    infos
        .iter()
        .enumerate()
        .flat_map(|(idx, candidate)| detect_invalid_mappings(&infos[..idx], candidate))
        .collect()
}

fn is_language_duplicate(other: &MappingInfo, candidate: &MappingInfo) -> bool {
    other.kind == candidate.kind
        && candidate.language_code.is_some()
        && other.language_code == candidate.language_code
        && other.path == candidate.path
        && other.column_name != candidate.column_name
}

fn is_property_duplicate(other: &MappingInfo, candidate: &MappingInfo) -> bool {
    other.kind == candidate.kind
        && other.path != candidate.path
        && candidate.property_id.is_some()
        && other.property_id == candidate.property_id
        && duplicate_scope(other) == duplicate_scope(candidate)
}

/// Containing scope within which a property may appear only once.
fn duplicate_scope(info: &MappingInfo) -> Option<SchemaPath> {
    match info.kind {
        TargetKind::QualifierValue | TargetKind::ReferenceValue => info.path.parent(),
        _ => None,
    }
}

fn language_issue(other: &MappingInfo, candidate: &MappingInfo) -> ValidationIssue {
    let language = candidate.language_code.as_deref().unwrap_or_default();
    let existing_column = other.column_name.as_deref().unwrap_or("a constant value");
    let mut issue = ValidationIssue::error(
        IssueCode::DuplicateLanguageMapping,
        candidate.path.clone(),
        format!(
            "{} for language '{language}' is already mapped from {}",
            candidate.kind.label(),
            describe_source(other.column_name.as_deref())
        ),
    )
    .with_context("languageCode", language)
    .with_context("existingColumn", existing_column);
    if let Some(column) = &candidate.column_name {
        issue = issue.with_context("columnName", column);
    }
    issue
}

fn property_issue(other: &MappingInfo, candidate: &MappingInfo) -> ValidationIssue {
    let property = candidate.property_id.as_deref().unwrap_or_default();
    let mut issue = ValidationIssue::error(
        IssueCode::DuplicatePropertyMapping,
        candidate.path.clone(),
        format!(
            "Property {property} is already mapped at {}",
            other.path
        ),
    )
    .with_context("propertyId", property)
    .with_context("existingPath", &other.path);
    if let Some(column) = &candidate.column_name {
        issue = issue.with_context("columnName", column);
    }
    issue
}

fn describe_source(column: Option<&str>) -> String {
    match column {
        Some(name) => format!("column '{name}'"),
        None => "a constant value".to_string(),
    }
}
