//! Target-side value kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Semantic value kind accepted by a schema target.
///
/// Serialized with the Wikibase datatype identifiers; deserialized through
/// [`FromStr`], so aliases load too. Values are opaque tags;
/// the only conversion between storage and semantic types is the
/// compatibility table in `wbs-validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SemanticType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "monolingualtext")]
    MonolingualText,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "external-id")]
    ExternalId,
    /// Reference to another item (`Q42`).
    #[serde(rename = "wikibase-item")]
    WikibaseItem,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "globe-coordinate")]
    GlobeCoordinate,
    /// File on Wikimedia Commons.
    #[serde(rename = "commonsMedia")]
    CommonsMedia,
}

impl SemanticType {
    pub const fn all() -> &'static [Self] {
        &[
            Self::String,
            Self::MonolingualText,
            Self::Url,
            Self::ExternalId,
            Self::WikibaseItem,
            Self::Quantity,
            Self::Time,
            Self::GlobeCoordinate,
            Self::CommonsMedia,
        ]
    }

    /// Wikibase datatype identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::MonolingualText => "monolingualtext",
            Self::Url => "url",
            Self::ExternalId => "external-id",
            Self::WikibaseItem => "wikibase-item",
            Self::Quantity => "quantity",
            Self::Time => "time",
            Self::GlobeCoordinate => "globe-coordinate",
            Self::CommonsMedia => "commonsMedia",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::MonolingualText => "Monolingual text",
            Self::Url => "URL",
            Self::ExternalId => "External identifier",
            Self::WikibaseItem => "Item",
            Self::Quantity => "Quantity",
            Self::Time => "Point in time",
            Self::GlobeCoordinate => "Geographic coordinates",
            Self::CommonsMedia => "Commons media file",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = ModelError;

    /// Parse a datatype identifier or one of its descriptive aliases
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "string" | "string-like" => Ok(Self::String),
            "monolingualtext" | "monolingual-text" => Ok(Self::MonolingualText),
            "url" => Ok(Self::Url),
            "external-id" | "externalid" => Ok(Self::ExternalId),
            "wikibase-item" | "item-reference" | "item" => Ok(Self::WikibaseItem),
            "quantity" => Ok(Self::Quantity),
            "time" => Ok(Self::Time),
            "globe-coordinate" | "coordinate" => Ok(Self::GlobeCoordinate),
            "commonsmedia" | "media-reference" => Ok(Self::CommonsMedia),
            _ => Err(ModelError::UnknownSemanticType(s.to_string())),
        }
    }
}

impl TryFrom<String> for SemanticType {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
