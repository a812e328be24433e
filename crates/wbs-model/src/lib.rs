//! Data model for mapping tabular source columns onto a Wikibase item schema.
//!
//! This crate holds the value types shared by the validation engine and the
//! editing surface:
//!
//! - **Source side**: [`ColumnDescriptor`] as produced by table ingestion
//! - **Sink side**: [`SchemaTarget`] slots addressed by [`SchemaPath`]
//! - **Mappings**: [`ValueMapping`] and the flat [`MappingInfo`] view
//! - **Schema tree**: [`ItemSchema`], the persisted mapping document
//! - **Options**: [`ValidationOptions`] for length limits and rule toggles
//!
//! All types serialize in camelCase to match the persisted schema format.

#![deny(unsafe_code)]

pub mod column;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod options;
pub mod path;
pub mod schema;
pub mod semantic;
pub mod target;

pub use column::ColumnDescriptor;
pub use error::{ModelError, Result};
pub use ids::{LanguageCode, PropertyId, is_valid_language_code, is_valid_property_id};
pub use mapping::{ColumnSource, MappingInfo, MappingSource, MappingType, ValueMapping};
pub use options::ValidationOptions;
pub use path::SchemaPath;
pub use schema::{
    ItemConfiguration, ItemSchema, PropertyReference, PropertyValueMapping, ReferenceMapping,
    StatementMapping, StatementRank, TermsMapping, paths,
};
pub use semantic::SemanticType;
pub use target::{SchemaTarget, TargetKind};
