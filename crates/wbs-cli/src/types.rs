use std::path::PathBuf;

use wbs_map::{SurfaceStatus, TargetSuggestion};
use wbs_model::{SchemaPath, SemanticType};
use wbs_validate::{LedgerCounts, StorageFamily, ValidationIssue};

/// Result of `wbs compat`.
#[derive(Debug, Clone)]
pub struct CompatReport {
    pub storage_type: String,
    pub normalized: String,
    pub family: Option<StorageFamily>,
    pub compatible: Vec<SemanticType>,
}

impl CompatReport {
    pub fn is_recognized(&self) -> bool {
        self.family.is_some()
    }
}

/// Pick-up simulation for one column.
#[derive(Debug, Clone)]
pub struct ColumnTargets {
    pub column: String,
    pub storage_type: String,
    /// Paths lit up when the column is picked up.
    pub valid_targets: Vec<SchemaPath>,
    /// Every target, ranked best first.
    pub suggestions: Vec<TargetSuggestion>,
}

impl ColumnTargets {
    pub fn lights_up(&self, path: &SchemaPath) -> bool {
        self.valid_targets.contains(path)
    }
}

/// Result of `wbs check`.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub schema_file: PathBuf,
    pub schema_name: String,
    pub status: SurfaceStatus,
    /// Slots with a property and value, or a term mapping.
    pub mapped_slots: usize,
    pub rules_checked: usize,
    pub counts: LedgerCounts,
    pub issues: Vec<ValidationIssue>,
    pub has_errors: bool,
}

impl CheckResult {
    pub fn not_started(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            schema_name: String::new(),
            status: SurfaceStatus::NotStarted,
            mapped_slots: 0,
            rules_checked: 0,
            counts: LedgerCounts::default(),
            issues: Vec::new(),
            has_errors: false,
        }
    }
}
