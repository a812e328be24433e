//! Editing surface: one schema editor instance.
//!
//! A [`MappingSurface`] owns the registered targets, the source columns, the
//! committed mappings, one [`DragSession`] and one [`ValidationLedger`].
//! Pointer events map onto [`pick_up`](MappingSurface::pick_up),
//! [`hover`](MappingSurface::hover), [`drop`](MappingSurface::drop) and
//! [`cancel`](MappingSurface::cancel).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};
use wbs_model::{
    ColumnDescriptor, MappingInfo, SchemaPath, SchemaTarget, SemanticType, ValidationOptions,
    ValueMapping,
};
use wbs_validate::{
    CompletenessReport, ValidationLedger, ValidationResult, check_completeness,
    detect_invalid_mappings, required_target_rules,
};

use crate::drag::{DragSession, DropOutcome};
use crate::error::SurfaceError;
use crate::registry::TargetRegistry;
use crate::score::{TargetSuggestion, rank_targets};

/// Committed mappings keyed by target path.
pub type CommittedMappings = BTreeMap<SchemaPath, ValueMapping>;

/// Overall progress of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceStatus {
    /// No mapping committed yet.
    NotStarted,
    /// Some required target lacks a mapping.
    Incomplete,
    Complete,
}

impl SurfaceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Incomplete => "Incomplete",
            Self::Complete => "Complete",
        }
    }
}

/// Summary counts for a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSummary {
    pub total_targets: usize,
    pub mapped: usize,
    pub required_total: usize,
    pub required_mapped: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone)]
pub struct MappingSurface {
    targets: TargetRegistry,
    columns: Vec<ColumnDescriptor>,
    options: ValidationOptions,
    mappings: CommittedMappings,
    drag: DragSession,
    ledger: ValidationLedger,
}

impl MappingSurface {
    pub fn new(
        targets: Vec<SchemaTarget>,
        columns: Vec<ColumnDescriptor>,
        options: ValidationOptions,
    ) -> Result<Self, SurfaceError> {
        Ok(Self {
            targets: TargetRegistry::new(targets)?,
            columns,
            options,
            mappings: CommittedMappings::new(),
            drag: DragSession::new(),
            ledger: ValidationLedger::new(),
        })
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn mappings(&self) -> &CommittedMappings {
        &self.mappings
    }

    pub fn mapping_at(&self, path: &SchemaPath) -> Option<&ValueMapping> {
        self.mappings.get(path)
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn ledger(&self) -> &ValidationLedger {
        &self.ledger
    }

    /// Start dragging a column. Returns the paths it may be dropped on.
    pub fn pick_up(&mut self, column_name: &str) -> Result<&[SchemaPath], SurfaceError> {
        let column = self
            .column(column_name)
            .cloned()
            .ok_or_else(|| SurfaceError::UnknownColumn(column_name.to_string()))?;
        Ok(self
            .drag
            .pick_up(column, &self.targets, &self.options, &mut self.ledger)?)
    }

    /// Move the hover. Returns live feedback for a registered target.
    pub fn hover(
        &mut self,
        path: Option<&SchemaPath>,
    ) -> Result<Option<&ValidationResult>, SurfaceError> {
        Ok(self
            .drag
            .hover(path, &self.targets, &self.options, &mut self.ledger)?)
    }

    /// Drop on the hovered target and commit the mapping if it is valid and
    /// does not conflict with existing mappings.
    pub fn drop(&mut self) -> Result<DropOutcome, SurfaceError> {
        let outcome = self
            .drag
            .drop(&self.targets, &self.options, &mut self.ledger)?;
        let (path, mapping) = match outcome {
            DropOutcome::Accepted { path, mapping } => (path, mapping),
            other => return Ok(other),
        };

        let conflicts = match self.targets.get(&path) {
            Some(target) => {
                let candidate = mapping_info(target, &mapping);
                detect_invalid_mappings(&self.mapping_infos(), &candidate)
            }
            None => Vec::new(),
        };
        if !conflicts.is_empty() {
            return Ok(self.drag.reject(conflicts, &mut self.ledger)?);
        }

        self.drag.complete(&mut self.ledger)?;
        info!(path = %path, column = mapping.column_name().unwrap_or_default(), "mapping committed");
        self.mappings.insert(path.clone(), mapping.clone());
        Ok(DropOutcome::Accepted { path, mapping })
    }

    /// Abandon the current drag.
    pub fn cancel(&mut self) {
        self.drag.cancel(&mut self.ledger);
    }

    /// Remove the mapping at `path`. Returns whether one existed.
    pub fn clear_mapping(&mut self, path: &SchemaPath) -> bool {
        self.ledger.clear_for_path(path);
        let removed = self.mappings.remove(path).is_some();
        if removed {
            debug!(path = %path, "mapping cleared");
        }
        removed
    }

    /// Commit a constant value at `path`. Duplicate language or property
    /// mappings are rejected as they are for drops.
    pub fn set_constant(
        &mut self,
        path: &SchemaPath,
        value: impl Into<String>,
        resolved_type: SemanticType,
    ) -> Result<(), SurfaceError> {
        self.set_literal(path, ValueMapping::constant(value, resolved_type))
    }

    /// Commit an expression at `path`.
    pub fn set_expression(
        &mut self,
        path: &SchemaPath,
        expression: impl Into<String>,
        resolved_type: SemanticType,
    ) -> Result<(), SurfaceError> {
        self.set_literal(path, ValueMapping::expression(expression, resolved_type))
    }

    fn set_literal(&mut self, path: &SchemaPath, mapping: ValueMapping) -> Result<(), SurfaceError> {
        let target = self
            .targets
            .get(path)
            .ok_or_else(|| SurfaceError::UnknownTarget(path.clone()))?;
        if !target.accepted_types.contains(&mapping.resolved_type) {
            return Err(SurfaceError::UnacceptedType {
                path: path.clone(),
                semantic_type: mapping.resolved_type,
            });
        }

        let candidate = mapping_info(target, &mapping);
        let conflicts = detect_invalid_mappings(&self.mapping_infos(), &candidate);
        if !conflicts.is_empty() {
            self.ledger.replace_for_path(path, conflicts.clone());
            return Err(SurfaceError::ConflictingMapping {
                path: path.clone(),
                issues: conflicts,
            });
        }

        self.ledger.clear_for_path(path);
        self.mappings.insert(path.clone(), mapping);
        Ok(())
    }

    /// Swap in a new target set, e.g. after the remote constraint lookup
    /// returns. Cancels any drag and drops mappings and ledger entries whose
    /// paths no longer exist.
    pub fn replace_targets(&mut self, targets: Vec<SchemaTarget>) -> Result<(), SurfaceError> {
        let registry = TargetRegistry::new(targets)?;
        self.drag.cancel(&mut self.ledger);
        self.targets = registry;

        let before = self.mappings.len();
        let targets = &self.targets;
        self.mappings.retain(|path, _| targets.contains(path));
        self.ledger.retain_paths(|path| targets.contains(path));
        debug!(
            targets = self.targets.len(),
            dropped_mappings = before - self.mappings.len(),
            "targets replaced"
        );
        Ok(())
    }

    /// Rank targets for a column, droppable first.
    pub fn suggestions_for(&self, column_name: &str) -> Result<Vec<TargetSuggestion>, SurfaceError> {
        let column = self
            .column(column_name)
            .ok_or_else(|| SurfaceError::UnknownColumn(column_name.to_string()))?;
        Ok(rank_targets(column, self.targets.iter(), &self.options))
    }

    /// Check required targets and sync the result into the ledger.
    pub fn check_completeness(&mut self) -> CompletenessReport {
        let report = self.completeness();
        report.apply_to_ledger(&mut self.ledger);
        report
    }

    /// Progress without touching the ledger.
    pub fn status(&self) -> SurfaceStatus {
        if self.mappings.is_empty() {
            SurfaceStatus::NotStarted
        } else if self.completeness().is_complete {
            SurfaceStatus::Complete
        } else {
            SurfaceStatus::Incomplete
        }
    }

    pub fn summary(&self) -> SurfaceSummary {
        let required_total = self.targets.required().count();
        let required_mapped = self
            .targets
            .required()
            .filter(|t| self.mappings.get(&t.path).is_some_and(ValueMapping::has_source))
            .count();
        let counts = self.ledger.counts();
        SurfaceSummary {
            total_targets: self.targets.len(),
            mapped: self.mappings.len(),
            required_total,
            required_mapped,
            errors: counts.errors,
            warnings: counts.warnings,
        }
    }

    fn completeness(&self) -> CompletenessReport {
        let rules = required_target_rules::<CommittedMappings>(self.targets.as_slice());
        check_completeness(&self.mappings, &rules)
    }

    fn mapping_infos(&self) -> Vec<MappingInfo> {
        self.mappings
            .iter()
            .filter_map(|(path, mapping)| {
                self.targets
                    .get(path)
                    .map(|target| mapping_info(target, mapping))
            })
            .collect()
    }
}

fn mapping_info(target: &SchemaTarget, mapping: &ValueMapping) -> MappingInfo {
    MappingInfo {
        path: target.path.clone(),
        kind: target.kind,
        language_code: target.language_code.clone(),
        property_id: target.property_id.clone(),
        column_name: mapping.column_name().map(str::to_string),
    }
}
