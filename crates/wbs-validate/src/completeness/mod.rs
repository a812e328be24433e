//! Completeness checking over a schema tree.
//!
//! A rule pairs a path with a predicate over some tree type. The checker is
//! generic over that type, so the same engine runs over an [`ItemSchema`]
//! document and over an editing surface's committed mappings. Every enabled
//! rule is evaluated independently, in list order.
//!
//! [`ItemSchema`]: wbs_model::ItemSchema

mod item;

pub use item::item_rules;

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use wbs_model::{SchemaPath, SchemaTarget, ValueMapping};

use crate::issue::{IssueCode, Severity, ValidationIssue};
use crate::ledger::ValidationLedger;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// One completeness requirement. The predicate returns `true` when satisfied.
pub struct CompletenessRule<T> {
    pub path: SchemaPath,
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    pub enabled: bool,
    predicate: Predicate<T>,
}

impl<T> CompletenessRule<T> {
    pub fn new<F>(path: SchemaPath, code: IssueCode, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            path,
            code,
            severity: Severity::Error,
            message: message.into(),
            enabled: true,
            predicate: Box::new(predicate),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_satisfied(&self, tree: &T) -> bool {
        (self.predicate)(tree)
    }

    fn to_issue(&self) -> ValidationIssue {
        ValidationIssue::error(self.code, self.path.clone(), self.message.clone())
            .with_severity(self.severity)
    }
}

impl<T> fmt::Debug for CompletenessRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletenessRule")
            .field("path", &self.path)
            .field("code", &self.code)
            .field("severity", &self.severity)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Result of a completeness check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    pub is_complete: bool,
    /// Paths with at least one failing rule, in rule order.
    pub missing_paths: Vec<SchemaPath>,
    /// One issue per failing rule.
    pub issues: Vec<ValidationIssue>,
    /// Paths of every enabled rule, in rule order.
    pub checked_paths: Vec<SchemaPath>,
}

impl CompletenessReport {
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// Replace the ledger entry of every checked path with this report's
    /// issues for that path. Satisfied paths end up cleared.
    pub fn apply_to_ledger(&self, ledger: &mut ValidationLedger) {
        let mut by_path: BTreeMap<&SchemaPath, Vec<ValidationIssue>> = self
            .checked_paths
            .iter()
            .map(|path| (path, Vec::new()))
            .collect();
        for issue in &self.issues {
            by_path
                .entry(&issue.path)
                .or_default()
                .push(issue.clone());
        }
        for (path, issues) in by_path {
            ledger.replace_for_path(path, issues);
        }
    }
}

/// Evaluate every enabled rule against `tree`.
pub fn check_completeness<T>(tree: &T, rules: &[CompletenessRule<T>]) -> CompletenessReport {
    let mut report = CompletenessReport::default();

    for rule in rules.iter().filter(|rule| rule.enabled) {
        if !report.checked_paths.contains(&rule.path) {
            report.checked_paths.push(rule.path.clone());
        }
        if rule.is_satisfied(tree) {
            continue;
        }
        if !report.missing_paths.contains(&rule.path) {
            report.missing_paths.push(rule.path.clone());
        }
        report.issues.push(rule.to_issue());
    }

    report.is_complete = report.missing_paths.is_empty();
    debug!(
        rules = rules.len(),
        checked = report.checked_paths.len(),
        missing = report.missing_paths.len(),
        complete = report.is_complete,
        "completeness checked"
    );
    report
}

/// Read access to committed mappings by path.
pub trait MappingLookup {
    fn mapping_at(&self, path: &SchemaPath) -> Option<&ValueMapping>;
}

impl MappingLookup for BTreeMap<SchemaPath, ValueMapping> {
    fn mapping_at(&self, path: &SchemaPath) -> Option<&ValueMapping> {
        self.get(path)
    }
}

/// One rule per required target: a mapping with a usable source must be
/// committed at the target's path.
pub fn required_target_rules<T>(targets: &[SchemaTarget]) -> Vec<CompletenessRule<T>>
where
    T: MappingLookup + 'static,
{
    targets
        .iter()
        .filter(|target| target.is_required)
        .map(|target| {
            let path = target.path.clone();
            CompletenessRule::new(
                target.path.clone(),
                IssueCode::MissingRequiredMapping,
                format!("{} is required but has no mapping", target.display_name()),
                move |tree: &T| tree.mapping_at(&path).is_some_and(ValueMapping::has_source),
            )
        })
        .collect()
}
