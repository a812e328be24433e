//! Compatibility and validation engine for Wikibase schema mappings.
//!
//! - [`compat`]: fixed storage type to semantic type table
//! - [`resolver`]: compatibility decisions and explanations
//! - [`validate`]: ordered per-mapping rules, first failure wins
//! - [`detect_invalid_mappings`]: duplicate language and property mappings
//! - [`ValidationLedger`]: active issues keyed by schema path
//! - [`check_completeness`]: rule-driven completeness over any tree type
//!
//! Nothing here performs I/O. Expected domain conditions come back as
//! [`ValidationIssue`]s, never as errors.

#![deny(unsafe_code)]

pub mod checks;
pub mod compat;
pub mod completeness;
pub mod duplicates;
pub mod issue;
pub mod ledger;
pub mod resolver;

pub use checks::{COMPATIBLE_MAPPING_MESSAGE, ValidationResult, validate, validate_for_pickup};
pub use compat::{
    StorageFamily, compatible_types, families_for, normalize_storage_type, storage_family,
};
pub use completeness::{
    CompletenessReport, CompletenessRule, MappingLookup, check_completeness, item_rules,
    required_target_rules,
};
pub use duplicates::{detect_all, detect_invalid_mappings};
pub use issue::{IssueCode, Severity, ValidationIssue};
pub use ledger::{LedgerCounts, ValidationLedger};
pub use resolver::{explain, is_compatible, resolve_type};
