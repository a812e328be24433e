//! Configuration options for mapping validation.

use serde::{Deserialize, Serialize};

/// Default maximum label length on a Wikibase instance.
pub const DEFAULT_LABEL_MAX_LENGTH: usize = 250;
/// Default maximum description length on a Wikibase instance.
pub const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 250;
/// Default maximum alias length.
pub const DEFAULT_ALIAS_MAX_LENGTH: usize = 100;

/// Options controlling the mapping validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Longest allowed label, in characters.
    pub label_max_length: usize,
    /// Longest allowed description, in characters.
    pub description_max_length: usize,
    /// Longest allowed alias, in characters.
    pub alias_max_length: usize,
    /// Reject nullable columns dropped on required targets.
    pub require_non_nullable_for_required: bool,
    /// Check term sample values against the length limits.
    pub check_sample_lengths: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            label_max_length: DEFAULT_LABEL_MAX_LENGTH,
            description_max_length: DEFAULT_DESCRIPTION_MAX_LENGTH,
            alias_max_length: DEFAULT_ALIAS_MAX_LENGTH,
            require_non_nullable_for_required: true,
            check_sample_lengths: true,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rules enabled with the default limits.
    ///
    /// Equivalent to [`Default`], kept as a named preset for callers that
    /// want to be explicit about strictness.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skip the nullability and sample-length heuristics.
    pub fn lenient() -> Self {
        Self {
            require_non_nullable_for_required: false,
            check_sample_lengths: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label_max_length(mut self, max: usize) -> Self {
        self.label_max_length = max;
        self
    }

    #[must_use]
    pub fn with_description_max_length(mut self, max: usize) -> Self {
        self.description_max_length = max;
        self
    }

    #[must_use]
    pub fn with_alias_max_length(mut self, max: usize) -> Self {
        self.alias_max_length = max;
        self
    }

    #[must_use]
    pub fn with_sample_length_checks(mut self, enable: bool) -> Self {
        self.check_sample_lengths = enable;
        self
    }
}
