//! Error types for drag sessions and editing surfaces.
//!
//! These signal caller misuse. Mapping problems a user can fix are reported
//! as validation issues instead.

use thiserror::Error;
use wbs_model::{SchemaPath, SemanticType};
use wbs_validate::ValidationIssue;

use crate::drag::DragPhase;

/// Errors from drag session transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DragError {
    /// The transition is not allowed from the current phase.
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        /// The attempted operation.
        action: &'static str,
        /// The phase the session was in.
        phase: DragPhase,
    },
}

impl DragError {
    pub(crate) fn invalid(action: &'static str, phase: DragPhase) -> Self {
        Self::InvalidTransition { action, phase }
    }

    /// Phase the session was in when the call was rejected.
    pub fn phase(&self) -> DragPhase {
        match self {
            Self::InvalidTransition { phase, .. } => *phase,
        }
    }
}

/// Errors from editing surface operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceError {
    /// Column not found in the source table.
    #[error("Column not found: {0}")]
    UnknownColumn(String),

    /// No target is registered at the path.
    #[error("Target not found: {0}")]
    UnknownTarget(SchemaPath),

    /// Two targets were registered at the same path.
    #[error("Duplicate target path: {0}")]
    DuplicateTarget(SchemaPath),

    /// A literal mapping names a type the target does not accept.
    #[error("Target {path} does not accept {semantic_type}")]
    UnacceptedType {
        /// The target path.
        path: SchemaPath,
        /// The rejected type.
        semantic_type: SemanticType,
    },

    /// A literal mapping conflicts with committed mappings. The issues are
    /// also recorded in the ledger.
    #[error("Mapping at {path} conflicts with an existing mapping")]
    ConflictingMapping {
        path: SchemaPath,
        issues: Vec<ValidationIssue>,
    },

    #[error(transparent)]
    Drag(#[from] DragError),
}

impl SurfaceError {
    /// Get the target path associated with this error, if any.
    pub fn path(&self) -> Option<&SchemaPath> {
        match self {
            Self::UnknownTarget(path) | Self::DuplicateTarget(path) => Some(path),
            Self::UnacceptedType { path, .. } | Self::ConflictingMapping { path, .. } => {
                Some(path)
            }
            Self::UnknownColumn(_) | Self::Drag(_) => None,
        }
    }

    /// Get the column name associated with this error, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::UnknownColumn(column) => Some(column),
            _ => None,
        }
    }
}
