//! Drag interaction state machine.
//!
//! One [`DragSession`] tracks a single pick-up-to-drop gesture. The session
//! does not own targets or the ledger; both are passed in by the editing
//! surface that owns them.
//!
//! ```text
//!  idle ──pick_up──▶ dragging ──drop(ok)──▶ dropping ──complete──▶ idle
//!                      │  ▲                    │
//!                hover │  │                    └─reject──▶ invalid ──pick_up/cancel──▶ idle
//!                      └──┘
//!               drop(no target) / cancel ──▶ idle
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};
use wbs_model::{ColumnDescriptor, SchemaPath, SchemaTarget, ValidationOptions, ValueMapping};
use wbs_validate::{
    IssueCode, ValidationIssue, ValidationLedger, ValidationResult, explain, resolve_type,
    validate, validate_for_pickup,
};

use crate::error::DragError;
use crate::registry::TargetRegistry;

/// Phase of a drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Dropping,
    Invalid,
}

impl DragPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Dropping => "dropping",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of dropping the dragged column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Validation passed. The session is in [`DragPhase::Dropping`] until
    /// [`DragSession::complete`] is called.
    Accepted {
        path: SchemaPath,
        mapping: ValueMapping,
    },
    /// Validation failed. The issue is in the ledger and the session is in
    /// [`DragPhase::Invalid`].
    Rejected(ValidationIssue),
    /// Nothing (or an unregistered path) was hovered. The session is idle.
    NoTarget,
}

impl DropOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
    dragged: Option<ColumnDescriptor>,
    hovered: Option<SchemaPath>,
    valid_targets: Vec<SchemaPath>,
    hover_result: Option<ValidationResult>,
    feedback: Option<HoverFeedback>,
    rejection: Option<ValidationIssue>,
}

/// Ledger entry written by live hover feedback, with the issues it displaced.
#[derive(Debug, Clone)]
struct HoverFeedback {
    path: SchemaPath,
    displaced: Vec<ValidationIssue>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn dragged_column(&self) -> Option<&ColumnDescriptor> {
        self.dragged.as_ref()
    }

    pub fn hovered_path(&self) -> Option<&SchemaPath> {
        self.hovered.as_ref()
    }

    /// Targets the dragged column may be dropped on, in registration order.
    pub fn valid_target_paths(&self) -> &[SchemaPath] {
        &self.valid_targets
    }

    pub fn is_valid_target(&self, path: &SchemaPath) -> bool {
        self.valid_targets.contains(path)
    }

    /// Full validation result for the hovered target.
    pub fn hover_result(&self) -> Option<&ValidationResult> {
        self.hover_result.as_ref()
    }

    /// The issue that put the session in [`DragPhase::Invalid`].
    pub fn rejection(&self) -> Option<&ValidationIssue> {
        self.rejection.as_ref()
    }

    /// Start dragging `column`.
    ///
    /// Valid targets are computed here, once, with the rules that do not
    /// need sample data. An in-flight drag is cancelled first.
    pub fn pick_up(
        &mut self,
        column: ColumnDescriptor,
        targets: &TargetRegistry,
        options: &ValidationOptions,
        ledger: &mut ValidationLedger,
    ) -> Result<&[SchemaPath], DragError> {
        match self.phase {
            DragPhase::Idle => {}
            DragPhase::Invalid => self.reset(),
            DragPhase::Dragging => {
                debug!("pick-up during drag, cancelling previous gesture");
                self.cancel(ledger);
            }
            DragPhase::Dropping => return Err(DragError::invalid("pick up", self.phase)),
        }

        self.valid_targets = targets
            .iter()
            .filter(|target| accepts_pickup(&column, target, options))
            .map(|target| target.path.clone())
            .collect();
        debug!(
            column = %column.name,
            valid = self.valid_targets.len(),
            total = targets.len(),
            "column picked up"
        );

        self.dragged = Some(column);
        self.phase = DragPhase::Dragging;
        Ok(&self.valid_targets)
    }

    /// Move the hover to `path` (or off all targets).
    ///
    /// Runs full validation against the hovered target and returns it as live
    /// feedback. A failing result is written to the ledger for that path; when
    /// the hover moves on, the path gets back the issues it held before.
    /// Valid targets are not recomputed.
    pub fn hover(
        &mut self,
        path: Option<&SchemaPath>,
        targets: &TargetRegistry,
        options: &ValidationOptions,
        ledger: &mut ValidationLedger,
    ) -> Result<Option<&ValidationResult>, DragError> {
        if self.phase != DragPhase::Dragging {
            return Err(DragError::invalid("hover", self.phase));
        }

        if self.hovered.as_ref() != path {
            self.clear_feedback(ledger);
        }
        self.hovered = path.cloned();
        self.hover_result = None;

        let (Some(path), Some(column)) = (path, self.dragged.as_ref()) else {
            return Ok(None);
        };
        let Some(target) = targets.get(path) else {
            trace!(path = %path, "hovering unregistered path");
            return Ok(None);
        };

        let result = validate(column, target, options);
        match &result.issue {
            Some(issue) => self.write_feedback(path, issue.clone(), ledger),
            None => self.clear_feedback(ledger),
        }
        trace!(path = %path, valid = result.is_valid, "hover validated");
        Ok(Some(self.hover_result.insert(result)))
    }

    /// Drop the dragged column on the hovered target.
    pub fn drop(
        &mut self,
        targets: &TargetRegistry,
        options: &ValidationOptions,
        ledger: &mut ValidationLedger,
    ) -> Result<DropOutcome, DragError> {
        if self.phase != DragPhase::Dragging {
            return Err(DragError::invalid("drop", self.phase));
        }

        let hovered = self.hovered.clone();
        let target = hovered.as_ref().and_then(|path| targets.get(path));
        let (Some(target), Some(column)) = (target, self.dragged.clone()) else {
            debug!(hovered = ?hovered.as_ref().map(SchemaPath::as_str), "drop without target");
            self.cancel(ledger);
            return Ok(DropOutcome::NoTarget);
        };

        self.phase = DragPhase::Dropping;
        let result = validate(&column, target, options);
        let resolved = resolve_type(&column.storage_type, &target.accepted_types);
        match (result.issue, resolved) {
            (None, Some(resolved_type)) => {
                debug!(column = %column.name, path = %target.path, %resolved_type, "drop accepted");
                Ok(DropOutcome::Accepted {
                    path: target.path.clone(),
                    mapping: ValueMapping::column(&column, resolved_type),
                })
            }
            (Some(issue), _) => Ok(self.reject_with(vec![issue], ledger)),
            (None, None) => {
                let issue = ValidationIssue::error(
                    IssueCode::IncompatibleDataType,
                    target.path.clone(),
                    explain(&column.storage_type, &target.accepted_types),
                );
                Ok(self.reject_with(vec![issue], ledger))
            }
        }
    }

    /// Finish an accepted drop. Clears the ledger entry of the dropped path
    /// and returns to idle.
    pub fn complete(&mut self, ledger: &mut ValidationLedger) -> Result<SchemaPath, DragError> {
        if self.phase != DragPhase::Dropping {
            return Err(DragError::invalid("complete", self.phase));
        }
        let Some(path) = self.hovered.clone() else {
            return Err(DragError::invalid("complete", self.phase));
        };
        ledger.clear_for_path(&path);
        self.reset();
        debug!(path = %path, "drop completed");
        Ok(path)
    }

    /// Reject an accepted drop after the fact, e.g. when the caller finds a
    /// conflict with existing mappings.
    pub fn reject(
        &mut self,
        issues: Vec<ValidationIssue>,
        ledger: &mut ValidationLedger,
    ) -> Result<DropOutcome, DragError> {
        if self.phase != DragPhase::Dropping || issues.is_empty() {
            return Err(DragError::invalid("reject", self.phase));
        }
        Ok(self.reject_with(issues, ledger))
    }

    /// Abandon the gesture from any phase. No mapping is committed.
    pub fn cancel(&mut self, ledger: &mut ValidationLedger) {
        if self.phase != DragPhase::Idle {
            debug!(phase = %self.phase, "drag cancelled");
        }
        self.clear_feedback(ledger);
        self.reset();
    }

    fn reject_with(
        &mut self,
        issues: Vec<ValidationIssue>,
        ledger: &mut ValidationLedger,
    ) -> DropOutcome {
        let path = issues[0].path.clone();
        let first = issues[0].clone();
        debug!(path = %path, code = %first.code, issues = issues.len(), "drop rejected");

        // The rejection supersedes the hover entry for this path.
        if let Some(feedback) = self.feedback.take()
            && feedback.path != path
        {
            ledger.replace_for_path(&feedback.path, feedback.displaced);
        }
        ledger.replace_for_path(&path, issues);

        self.reset();
        self.phase = DragPhase::Invalid;
        self.rejection = Some(first.clone());
        DropOutcome::Rejected(first)
    }

    fn write_feedback(
        &mut self,
        path: &SchemaPath,
        issue: ValidationIssue,
        ledger: &mut ValidationLedger,
    ) {
        if self.feedback.as_ref().map(|f| &f.path) != Some(path) {
            self.clear_feedback(ledger);
            self.feedback = Some(HoverFeedback {
                path: path.clone(),
                displaced: ledger.errors_for_path(path).to_vec(),
            });
        }
        ledger.replace_for_path(path, [issue]);
    }

    /// Put back whatever the hover feedback displaced.
    fn clear_feedback(&mut self, ledger: &mut ValidationLedger) {
        if let Some(feedback) = self.feedback.take() {
            ledger.replace_for_path(&feedback.path, feedback.displaced);
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn accepts_pickup(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    options: &ValidationOptions,
) -> bool {
    if target.accepted_types.is_empty() {
        warn!(path = %target.path, "target accepts no data types, skipping");
        return false;
    }
    let result = validate_for_pickup(column, target, options);
    trace!(path = %target.path, valid = result.is_valid, "pick-up rule check");
    result.is_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_model::{SemanticType, TargetKind, paths};

    fn registry() -> TargetRegistry {
        TargetRegistry::new(vec![
            SchemaTarget::term(TargetKind::TermLabel, paths::label("en"), "en"),
            SchemaTarget::term(TargetKind::TermAlias, paths::alias("en", 0), "en"),
            SchemaTarget::property(
                TargetKind::StatementValue,
                paths::statement_value(0),
                "P1104",
                [SemanticType::Quantity],
            ),
        ])
        .unwrap()
    }

    fn title() -> ColumnDescriptor {
        ColumnDescriptor::new("title", "VARCHAR").with_samples(["A Tale of Two Cities"])
    }

    #[test]
    fn pick_up_computes_valid_targets() {
        let mut session = DragSession::new();
        let mut ledger = ValidationLedger::new();
        let options = ValidationOptions::default();

        let valid = session
            .pick_up(title(), &registry(), &options, &mut ledger)
            .unwrap()
            .to_vec();
        assert_eq!(valid, vec![paths::label("en"), paths::alias("en", 0)]);
        assert_eq!(session.phase(), DragPhase::Dragging);
    }

    #[test]
    fn hover_writes_and_clears_feedback() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();
        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();

        let statement = paths::statement_value(0);
        let result = session
            .hover(Some(&statement), &targets, &options, &mut ledger)
            .unwrap()
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(ledger.errors_for_path(&statement).len(), 1);

        let label = paths::label("en");
        let result = session
            .hover(Some(&label), &targets, &options, &mut ledger)
            .unwrap()
            .unwrap();
        assert!(result.is_valid);
        assert!(ledger.is_empty());
    }

    #[test]
    fn accepted_drop_then_complete() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();
        let label = paths::label("en");

        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        session.hover(Some(&label), &targets, &options, &mut ledger).unwrap();
        let outcome = session.drop(&targets, &options, &mut ledger).unwrap();
        let DropOutcome::Accepted { path, mapping } = outcome else {
            panic!("expected accepted drop, got {outcome:?}");
        };
        assert_eq!(path, label);
        assert_eq!(mapping.resolved_type, SemanticType::String);
        assert_eq!(session.phase(), DragPhase::Dropping);

        assert_eq!(session.complete(&mut ledger).unwrap(), label);
        assert_eq!(session.phase(), DragPhase::Idle);
        assert!(session.dragged_column().is_none());
    }

    #[test]
    fn rejected_drop_enters_invalid_until_next_interaction() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();
        let alias = paths::alias("en", 0);
        let long = ColumnDescriptor::new("blurb", "TEXT").with_samples(["x".repeat(150)]);

        session.pick_up(long, &targets, &options, &mut ledger).unwrap();
        session.hover(Some(&alias), &targets, &options, &mut ledger).unwrap();
        let outcome = session.drop(&targets, &options, &mut ledger).unwrap();
        assert!(matches!(outcome, DropOutcome::Rejected(_)));
        assert_eq!(session.phase(), DragPhase::Invalid);
        assert!(session.rejection().is_some());
        assert!(session.hovered_path().is_none());
        assert_eq!(ledger.errors_for_path(&alias).len(), 1);

        let err = session.drop(&targets, &options, &mut ledger).unwrap_err();
        assert_eq!(err.phase(), DragPhase::Invalid);

        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        assert_eq!(session.phase(), DragPhase::Dragging);
        assert!(session.rejection().is_none());
        // The rejection stays in the ledger until that path is fixed.
        assert_eq!(ledger.errors_for_path(&alias).len(), 1);
    }

    #[test]
    fn drop_without_target_resets() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();

        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        assert_eq!(
            session.drop(&targets, &options, &mut ledger).unwrap(),
            DropOutcome::NoTarget
        );
        assert_eq!(session.phase(), DragPhase::Idle);

        let unknown = SchemaPath::parse("item.terms.labels.fr").unwrap();
        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        assert!(
            session
                .hover(Some(&unknown), &targets, &options, &mut ledger)
                .unwrap()
                .is_none()
        );
        assert_eq!(
            session.drop(&targets, &options, &mut ledger).unwrap(),
            DropOutcome::NoTarget
        );
    }

    #[test]
    fn cancel_clears_hover_feedback() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();

        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        session
            .hover(Some(&paths::statement_value(0)), &targets, &options, &mut ledger)
            .unwrap();
        assert!(!ledger.is_empty());

        session.cancel(&mut ledger);
        assert!(ledger.is_empty());
        assert_eq!(session.phase(), DragPhase::Idle);
        assert!(session.valid_target_paths().is_empty());
    }

    #[test]
    fn hover_feedback_restores_displaced_issues() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();
        let statement = paths::statement_value(0);
        let missing = ValidationIssue::error(
            IssueCode::MissingRequiredMapping,
            statement.clone(),
            "P1104 is required but has no mapping",
        );
        ledger.add(missing.clone());

        session.pick_up(title(), &targets, &options, &mut ledger).unwrap();
        session.hover(Some(&statement), &targets, &options, &mut ledger).unwrap();
        session.hover(Some(&statement), &targets, &options, &mut ledger).unwrap();
        let shown = ledger.errors_for_path(&statement);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].code, IssueCode::IncompatibleDataType);

        session.hover(Some(&paths::label("en")), &targets, &options, &mut ledger).unwrap();
        assert_eq!(ledger.errors_for_path(&statement), [missing.clone()]);

        session.hover(Some(&statement), &targets, &options, &mut ledger).unwrap();
        session.cancel(&mut ledger);
        assert_eq!(ledger.errors_for_path(&statement), [missing]);
    }

    #[test]
    fn wrong_phase_calls_leave_state_unchanged() {
        let targets = registry();
        let options = ValidationOptions::default();
        let mut ledger = ValidationLedger::new();
        let mut session = DragSession::new();

        assert!(session.hover(None, &targets, &options, &mut ledger).is_err());
        assert!(session.complete(&mut ledger).is_err());
        let err = session.drop(&targets, &options, &mut ledger).unwrap_err();
        assert_eq!(err.to_string(), "Cannot drop while idle");
        assert_eq!(session.phase(), DragPhase::Idle);
    }

    #[test]
    fn targets_accepting_nothing_are_skipped() {
        let targets = TargetRegistry::new(vec![SchemaTarget::property(
            TargetKind::ReferenceValue,
            paths::reference_snak(0, 0, 0),
            "P854",
            [],
        )])
        .unwrap();
        let mut session = DragSession::new();
        let valid = session
            .pick_up(title(), &targets, &ValidationOptions::default(), &mut ValidationLedger::new())
            .unwrap();
        assert!(valid.is_empty());
    }
}
