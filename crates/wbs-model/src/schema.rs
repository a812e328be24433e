//! The persisted item schema tree.
//!
//! An [`ItemSchema`] is the document the mapping assembly layer builds up and
//! the persistence layer stores. Path helpers here define the canonical
//! [`SchemaPath`] of every slot so that ledger keys, completeness rules and
//! duplicate detection agree on locations.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::{MappingInfo, SchemaPath, SemanticType, TargetKind, ValueMapping};

/// A mapping schema for one kind of item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSchema {
    pub name: String,
    /// Base URL of the target Wikibase instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikibase: Option<String>,
    pub item: ItemConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemConfiguration {
    pub terms: TermsMapping,
    pub statements: Vec<StatementMapping>,
}

/// Labels, descriptions and aliases keyed by language code.
///
/// Keys become path segments, so a document whose keys are not valid
/// segment names is rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermsMapping {
    #[serde(deserialize_with = "language_keyed")]
    pub labels: BTreeMap<String, ValueMapping>,
    #[serde(deserialize_with = "language_keyed")]
    pub descriptions: BTreeMap<String, ValueMapping>,
    #[serde(deserialize_with = "language_keyed")]
    pub aliases: BTreeMap<String, Vec<ValueMapping>>,
}

fn language_keyed<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let map = BTreeMap::<String, V>::deserialize(deserializer)?;
    match map.keys().find(|key| !SchemaPath::is_segment_name(key)) {
        Some(key) => Err(de::Error::custom(format_args!(
            "language key '{key}' is not a valid path segment"
        ))),
        None => Ok(map),
    }
}

impl TermsMapping {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.descriptions.is_empty() && self.aliases.is_empty()
    }
}

/// Property reference as resolved against the remote instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<SemanticType>,
}

impl PropertyReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementRank {
    Preferred,
    #[default]
    Normal,
    Deprecated,
}

/// A property/value pair used for qualifiers and reference snaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyValueMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceMapping {
    pub snaks: Vec<PropertyValueMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueMapping>,
    pub rank: StatementRank,
    pub qualifiers: Vec<PropertyValueMapping>,
    pub references: Vec<ReferenceMapping>,
}

impl ItemSchema {
    /// Nothing entered yet: no name, no instance, no mappings.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.wikibase.as_deref().is_none_or(|w| w.trim().is_empty())
            && self.item.terms.is_empty()
            && self.item.statements.is_empty()
    }

    /// Flatten every mapped slot into [`MappingInfo`] records.
    pub fn mapping_infos(&self) -> Vec<MappingInfo> {
        let mut infos = Vec::new();
        let terms = &self.item.terms;

        for (lang, mapping) in &terms.labels {
            infos.push(MappingInfo::term(
                TargetKind::TermLabel,
                paths::label(lang),
                lang.clone(),
                mapping.column_name().map(str::to_string),
            ));
        }
        for (lang, mapping) in &terms.descriptions {
            infos.push(MappingInfo::term(
                TargetKind::TermDescription,
                paths::description(lang),
                lang.clone(),
                mapping.column_name().map(str::to_string),
            ));
        }
        for (lang, aliases) in &terms.aliases {
            for (idx, mapping) in aliases.iter().enumerate() {
                infos.push(MappingInfo::term(
                    TargetKind::TermAlias,
                    paths::alias(lang, idx),
                    lang.clone(),
                    mapping.column_name().map(str::to_string),
                ));
            }
        }

        for (s_idx, statement) in self.item.statements.iter().enumerate() {
            if let (Some(property), Some(value)) = (&statement.property, &statement.value) {
                infos.push(MappingInfo::property(
                    TargetKind::StatementValue,
                    paths::statement_value(s_idx),
                    property.id.clone(),
                    value.column_name().map(str::to_string),
                ));
            }
            for (q_idx, qualifier) in statement.qualifiers.iter().enumerate() {
                if let (Some(property), Some(value)) = (&qualifier.property, &qualifier.value) {
                    infos.push(MappingInfo::property(
                        TargetKind::QualifierValue,
                        paths::qualifier(s_idx, q_idx),
                        property.id.clone(),
                        value.column_name().map(str::to_string),
                    ));
                }
            }
            for (r_idx, reference) in statement.references.iter().enumerate() {
                for (n_idx, snak) in reference.snaks.iter().enumerate() {
                    if let (Some(property), Some(value)) = (&snak.property, &snak.value) {
                        infos.push(MappingInfo::property(
                            TargetKind::ReferenceValue,
                            paths::reference_snak(s_idx, r_idx, n_idx),
                            property.id.clone(),
                            value.column_name().map(str::to_string),
                        ));
                    }
                }
            }
        }

        infos
    }
}

/// Canonical paths of schema slots.
///
/// Language keys that are not valid path segments collapse onto their
/// parent collection path. Loaded documents never carry such keys.
pub mod paths {
    use crate::SchemaPath;

    fn fixed(raw: &'static str) -> SchemaPath {
        SchemaPath::parse(raw).expect("static schema path")
    }

    pub fn name() -> SchemaPath {
        fixed("name")
    }

    pub fn wikibase() -> SchemaPath {
        fixed("wikibase")
    }

    pub fn item() -> SchemaPath {
        fixed("item")
    }

    pub fn labels() -> SchemaPath {
        fixed("item.terms.labels")
    }

    pub fn descriptions() -> SchemaPath {
        fixed("item.terms.descriptions")
    }

    pub fn aliases() -> SchemaPath {
        fixed("item.terms.aliases")
    }

    pub fn statements() -> SchemaPath {
        fixed("item.statements")
    }

    pub fn label(lang: &str) -> SchemaPath {
        labels().child_or_self(lang)
    }

    pub fn description(lang: &str) -> SchemaPath {
        descriptions().child_or_self(lang)
    }

    pub fn alias_language(lang: &str) -> SchemaPath {
        aliases().child_or_self(lang)
    }

    pub fn alias(lang: &str, idx: usize) -> SchemaPath {
        alias_language(lang).index(idx)
    }

    pub fn statement(idx: usize) -> SchemaPath {
        statements().index(idx)
    }

    fn statement_child(idx: usize, name: &'static str) -> SchemaPath {
        SchemaPath::parse(&format!("item.statements[{idx}].{name}")).expect("statement path")
    }

    pub fn statement_property(idx: usize) -> SchemaPath {
        statement_child(idx, "property")
    }

    pub fn statement_value(idx: usize) -> SchemaPath {
        statement_child(idx, "value")
    }

    pub fn qualifier(s_idx: usize, q_idx: usize) -> SchemaPath {
        statement_child(s_idx, "qualifiers").index(q_idx)
    }

    pub fn reference_snak(s_idx: usize, r_idx: usize, n_idx: usize) -> SchemaPath {
        SchemaPath::parse(&format!(
            "item.statements[{s_idx}].references[{r_idx}].snaks[{n_idx}]"
        ))
        .expect("reference snak path")
    }
}
