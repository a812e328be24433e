//! Path-indexed collection of active validation issues.
//!
//! The ledger knows nothing about drag state or schema structure. Producers
//! (live drag feedback, completeness checks, duplicate detection) follow a
//! clear-before-add discipline per path so stale issues never linger. Paths
//! with no issues are never stored.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};
use wbs_model::SchemaPath;

use crate::issue::{Severity, ValidationIssue};

/// Issue totals by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerCounts {
    pub paths: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl LedgerCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationLedger {
    entries: BTreeMap<SchemaPath, Vec<ValidationIssue>>,
}

impl ValidationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue under its own path.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.entries
            .entry(issue.path.clone())
            .or_default()
            .push(issue);
    }

    pub fn extend<I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        for issue in issues {
            self.add(issue);
        }
    }

    /// Remove every issue for `path`. Returns how many were removed.
    pub fn clear_for_path(&mut self, path: &SchemaPath) -> usize {
        self.entries.remove(path).map_or(0, |issues| issues.len())
    }

    /// Clear `path` and then add `issues`, as one step.
    ///
    /// Issues whose own path differs from `path` are dropped.
    pub fn replace_for_path<I>(&mut self, path: &SchemaPath, issues: I)
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        let (kept, stray): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(|issue| &issue.path == path);
        if !stray.is_empty() {
            warn!(
                path = %path,
                dropped = stray.len(),
                "ignoring issues filed under a different path"
            );
        }

        let removed = self.clear_for_path(path);
        debug!(path = %path, removed, added = kept.len(), "ledger entry replaced");
        if !kept.is_empty() {
            self.entries.insert(path.clone(), kept);
        }
    }

    /// True if any path has an error. Warnings do not count.
    pub fn has_errors(&self) -> bool {
        self.iter().any(ValidationIssue::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.iter()
            .any(|issue| issue.severity == Severity::Warning)
    }

    /// Issues currently recorded for `path`; empty if none.
    pub fn errors_for_path(&self, path: &SchemaPath) -> &[ValidationIssue] {
        self.entries
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_path(&self, path: &SchemaPath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> LedgerCounts {
        let errors = self.iter().filter(|issue| issue.is_error()).count();
        LedgerCounts {
            paths: self.entries.len(),
            errors,
            warnings: self.iter().count() - errors,
        }
    }

    /// Paths with at least one issue, in path order.
    pub fn paths(&self) -> impl Iterator<Item = &SchemaPath> {
        self.entries.keys()
    }

    /// All issues in path order, insertion order within a path.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.entries.values().flatten()
    }

    pub fn all_issues(&self) -> Vec<ValidationIssue> {
        self.iter().cloned().collect()
    }

    /// Drop every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Keep only entries whose path satisfies `keep`.
    pub fn retain_paths<F>(&mut self, mut keep: F)
    where
        F: FnMut(&SchemaPath) -> bool,
    {
        self.entries.retain(|path, _| keep(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueCode;

    fn path(raw: &str) -> SchemaPath {
        SchemaPath::parse(raw).unwrap()
    }

    fn error(raw: &str) -> ValidationIssue {
        ValidationIssue::error(IssueCode::IncompatibleDataType, path(raw), "bad type")
    }

    fn warning(raw: &str) -> ValidationIssue {
        ValidationIssue::warning(IssueCode::MissingStatementValue, path(raw), "no value")
    }

    #[test]
    fn clear_then_add_leaves_one_issue() {
        let mut ledger = ValidationLedger::new();
        let p = path("item.terms.labels.en");
        ledger.add(error("item.terms.labels.en"));
        ledger.add(error("item.terms.labels.en"));
        assert_eq!(ledger.errors_for_path(&p).len(), 2);

        assert_eq!(ledger.clear_for_path(&p), 2);
        ledger.add(error("item.terms.labels.en"));
        assert_eq!(ledger.errors_for_path(&p).len(), 1);
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut ledger = ValidationLedger::new();
        ledger.add(warning("item.statements[0].value"));
        assert!(!ledger.has_errors());
        assert!(ledger.has_warnings());
        ledger.add(error("name"));
        assert!(ledger.has_errors());
        assert_eq!(
            ledger.counts(),
            LedgerCounts {
                paths: 2,
                errors: 1,
                warnings: 1
            }
        );
    }

    #[test]
    fn replace_drops_stray_paths_and_empty_entries() {
        let mut ledger = ValidationLedger::new();
        let p = path("name");
        ledger.add(error("name"));
        ledger.replace_for_path(&p, vec![warning("name"), error("wikibase")]);
        assert_eq!(ledger.errors_for_path(&p).len(), 1);
        assert!(!ledger.contains_path(&path("wikibase")));

        ledger.replace_for_path(&p, Vec::new());
        assert!(ledger.is_empty());
        assert!(ledger.errors_for_path(&p).is_empty());
    }

    #[test]
    fn iteration_is_in_path_order() {
        let mut ledger = ValidationLedger::new();
        ledger.add(error("wikibase"));
        ledger.add(error("item.terms.labels"));
        ledger.add(error("name"));
        let order: Vec<&str> = ledger.paths().map(SchemaPath::as_str).collect();
        assert_eq!(order, vec!["item.terms.labels", "name", "wikibase"]);

        ledger.retain_paths(|p| p.as_str() != "name");
        assert_eq!(ledger.counts().paths, 2);
        ledger.reset();
        assert!(ledger.is_empty());
    }
}
