//! Interactive column-to-target mapping for Wikibase item schemas.
//!
//! # Components
//!
//! - [`DragSession`]: state machine for one pick-up-to-drop gesture
//! - [`MappingSurface`]: one editor instance owning targets, committed
//!   mappings, a drag session and a validation ledger
//! - [`feedback`]: hover feedback and fix suggestions for the rendering layer
//! - [`rank_targets`]: Jaro-Winkler ranking of targets for a column
//!
//! # Example
//!
//! ```ignore
//! use wbs_map::{DropOutcome, MappingSurface};
//!
//! let mut surface = MappingSurface::new(targets, columns, options)?;
//! let valid = surface.pick_up("title")?.to_vec();
//! surface.hover(Some(&valid[0]))?;
//! match surface.drop()? {
//!     DropOutcome::Accepted { path, .. } => println!("mapped {path}"),
//!     DropOutcome::Rejected(issue) => println!("{issue}"),
//!     DropOutcome::NoTarget => {}
//! }
//! ```

#![deny(unsafe_code)]

pub mod drag;
mod error;
pub mod feedback;
pub mod registry;
pub mod score;
pub mod surface;

pub use drag::{DragPhase, DragSession, DropOutcome};
pub use error::{DragError, SurfaceError};
pub use feedback::{
    FeedbackTone, ValidationFeedback, validate_drag_operation, validation_feedback,
    validation_suggestions,
};
pub use registry::TargetRegistry;
pub use score::{ScoreComponent, TargetScore, TargetSuggestion, rank_targets, score_target};
pub use surface::{CommittedMappings, MappingSurface, SurfaceStatus, SurfaceSummary};
