//! Persisted schema documents as produced by the editor.

use wbs_model::{
    ItemSchema, MappingType, SchemaPath, SchemaTarget, SemanticType, StatementRank, TargetKind,
    paths,
};

const BOOK_SCHEMA: &str = r#"{
    "name": "Books",
    "wikibase": "https://www.wikidata.org",
    "item": {
        "terms": {
            "labels": {
                "en": {"mappingType": "column",
                       "source": {"columnName": "title", "storageType": "VARCHAR"},
                       "resolvedType": "monolingualtext"}
            },
            "aliases": {
                "en": [
                    {"mappingType": "column",
                     "source": {"columnName": "short_title", "storageType": "TEXT"},
                     "resolvedType": "string"},
                    {"mappingType": "expression", "source": "{title} (novel)",
                     "resolvedType": "string"}
                ]
            }
        },
        "statements": [
            {
                "property": {"id": "P31", "dataType": "wikibase-item"},
                "value": {"mappingType": "constant", "source": "Q7725634",
                          "resolvedType": "wikibase-item"},
                "rank": "preferred"
            },
            {
                "property": {"id": "P577"},
                "value": {"mappingType": "column",
                          "source": {"columnName": "published", "storageType": "DATE"},
                          "resolvedType": "time"},
                "qualifiers": [
                    {"property": {"id": "P291"}},
                    {"property": {"id": "P1480"},
                     "value": {"mappingType": "constant", "source": "Q18122778",
                               "resolvedType": "wikibase-item"}}
                ],
                "references": [
                    {"snaks": [
                        {"property": {"id": "P854"},
                         "value": {"mappingType": "column",
                                   "source": {"columnName": "source_url", "storageType": "TEXT"},
                                   "resolvedType": "url"}}
                    ]}
                ]
            }
        ]
    }
}"#;

fn book_schema() -> ItemSchema {
    serde_json::from_str(BOOK_SCHEMA).expect("schema json")
}

#[test]
fn loads_nested_schema_document() {
    let schema = book_schema();
    assert!(!schema.is_empty());
    assert_eq!(schema.item.statements.len(), 2);

    let first = &schema.item.statements[0];
    assert_eq!(first.rank, StatementRank::Preferred);
    assert_eq!(
        first.property.as_ref().and_then(|p| p.data_type),
        Some(SemanticType::WikibaseItem)
    );
    assert_eq!(schema.item.statements[1].rank, StatementRank::Normal);

    let aliases = &schema.item.terms.aliases["en"];
    assert_eq!(aliases[0].column_name(), Some("short_title"));
    assert_eq!(aliases[1].mapping_type, MappingType::Expression);
    assert_eq!(aliases[1].column_name(), None);
    assert!(aliases[1].has_source());
}

#[test]
fn mapping_infos_skip_incomplete_slots() {
    let infos = book_schema().mapping_infos();
    let located: Vec<(TargetKind, &str)> = infos
        .iter()
        .map(|info| (info.kind, info.path.as_str()))
        .collect();

    // The qualifier without a value is not a mapped slot.
    assert_eq!(
        located,
        vec![
            (TargetKind::TermLabel, "item.terms.labels.en"),
            (TargetKind::TermAlias, "item.terms.aliases.en[0]"),
            (TargetKind::TermAlias, "item.terms.aliases.en[1]"),
            (TargetKind::StatementValue, "item.statements[0].value"),
            (TargetKind::StatementValue, "item.statements[1].value"),
            (TargetKind::QualifierValue, "item.statements[1].qualifiers[1]"),
            (
                TargetKind::ReferenceValue,
                "item.statements[1].references[0].snaks[0]"
            ),
        ]
    );

    let reference = infos.last().expect("reference info");
    assert_eq!(reference.property_id.as_deref(), Some("P854"));
    assert_eq!(reference.column_name.as_deref(), Some("source_url"));
}

#[test]
fn empty_document_is_not_started() {
    let schema: ItemSchema = serde_json::from_str("{}").expect("empty schema");
    assert!(schema.is_empty());
    assert!(schema.mapping_infos().is_empty());

    let blank: ItemSchema =
        serde_json::from_str(r#"{"name": "  ", "wikibase": ""}"#).expect("blank schema");
    assert!(blank.is_empty());
}

#[test]
fn serialized_schema_keeps_wire_names() {
    let value = serde_json::to_value(book_schema()).expect("serialize");
    let statement = &value["item"]["statements"][1];
    assert_eq!(statement["value"]["mappingType"], "column");
    assert_eq!(statement["value"]["source"]["columnName"], "published");
    assert_eq!(statement["rank"], "normal");
    assert!(statement["qualifiers"][0].get("value").is_none());
}

#[test]
fn targets_reject_malformed_paths_on_load() {
    let ok: SchemaTarget = serde_json::from_str(
        r#"{"kind": "qualifier-value", "path": "item.statements[0].qualifiers[2]",
            "acceptedTypes": ["quantity"], "propertyId": "P1107"}"#,
    )
    .expect("target json");
    assert_eq!(ok.path.parent(), Some(paths::statement(0)));
    assert!(!ok.is_required);

    let bad = serde_json::from_str::<SchemaTarget>(
        r#"{"kind": "qualifier-value", "path": "item.statements[01]"}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn invalid_language_keys_collapse_to_collection() {
    assert_eq!(paths::label("en"), SchemaPath::parse("item.terms.labels.en").unwrap());
    assert_eq!(paths::label("not a code"), paths::labels());
    assert_eq!(paths::alias("de", 3).as_str(), "item.terms.aliases.de[3]");
}

#[test]
fn language_keys_must_be_path_segments() {
    let result = serde_json::from_str::<ItemSchema>(
        r#"{"item": {"terms": {"labels": {
            "en us": {"mappingType": "constant", "source": "Emma", "resolvedType": "string"},
            "fr fr": {"mappingType": "constant", "source": "Emma", "resolvedType": "string"}
        }}}}"#,
    );
    let error = result.expect_err("keys with spaces");
    assert!(error.to_string().contains("language key 'en us'"));

    let schema: ItemSchema = serde_json::from_str(
        r#"{"item": {"terms": {"aliases": {"zh-hant": [
            {"mappingType": "constant", "source": "艾玛", "resolvedType": "string"}
        ]}}}}"#,
    )
    .expect("hyphenated key");
    assert_eq!(
        schema.mapping_infos()[0].path.as_str(),
        "item.terms.aliases.zh-hant[0]"
    );
}
