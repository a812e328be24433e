use wbs_model::{
    ColumnDescriptor, ItemSchema, MappingInfo, SchemaPath, SchemaTarget, SemanticType,
    TargetKind, ValidationOptions, ValueMapping, paths,
};
use wbs_validate::{
    IssueCode, ValidationLedger, check_completeness, detect_all, detect_invalid_mappings,
    item_rules, validate, validate_for_pickup,
};

fn path(raw: &str) -> SchemaPath {
    SchemaPath::parse(raw).expect("fixture path")
}

fn string_statement(required: bool) -> SchemaTarget {
    SchemaTarget::property(
        TargetKind::StatementValue,
        path("item.statements[0].value"),
        "P1476",
        [SemanticType::String],
    )
    .required(required)
}

#[test]
fn integer_column_on_string_target_is_incompatible() {
    let column = ColumnDescriptor::new("page_count", "INTEGER");
    let result = validate(&column, &string_statement(false), &ValidationOptions::default());

    assert!(!result.is_valid);
    let issue = result.issue.expect("issue");
    assert_eq!(issue.code, IssueCode::IncompatibleDataType);
    assert_eq!(issue.path.as_str(), "item.statements[0].value");
    assert_eq!(issue.context_value("columnName"), Some("page_count"));
}

#[test]
fn nullable_column_on_required_target() {
    let column = ColumnDescriptor::new("title", "VARCHAR").with_nullable(true);
    let result = validate(&column, &string_statement(true), &ValidationOptions::default());

    assert!(!result.is_valid);
    assert_eq!(
        result.issue.expect("issue").code,
        IssueCode::MissingRequiredMapping
    );
}

#[test]
fn long_samples_against_label_and_alias_limits() {
    let column = ColumnDescriptor::new("blurb", "TEXT").with_samples(["x".repeat(300)]);
    let options = ValidationOptions::default();

    let label = SchemaTarget::term(TargetKind::TermLabel, paths::label("en"), "en");
    let result = validate(&column, &label, &options);
    assert!(!result.is_valid);
    assert!(result.message().contains("shorter than 250 characters"));

    let alias = SchemaTarget::term(TargetKind::TermAlias, paths::alias("en", 0), "en");
    let result = validate(&column, &alias, &options);
    assert!(!result.is_valid);
    assert!(result.message().contains("100 characters"));
}

#[test]
fn statement_without_property_id_is_rejected() {
    let options = ValidationOptions::default();
    let target = string_statement(false).without_property();

    let compatible = ColumnDescriptor::new("title", "VARCHAR");
    let result = validate(&compatible, &target, &options);
    assert_eq!(
        result.issue.expect("issue").code,
        IssueCode::InvalidPropertyId
    );

    // String-only target, so the column is also incompatible.
    let numeric = ColumnDescriptor::new("pages", "INTEGER").with_nullable(true);
    let result = validate(&numeric, &target.clone().required(true), &options);
    assert!(!result.is_valid);
    assert_eq!(
        result.issue.expect("issue").code,
        IssueCode::InvalidPropertyId
    );
    assert!(!validate_for_pickup(&numeric, &target, &options).is_valid);
}

#[test]
fn two_english_labels_from_different_columns() {
    let existing = vec![MappingInfo::term(
        TargetKind::TermLabel,
        paths::label("en"),
        "en",
        Some("title".to_string()),
    )];
    let candidate = MappingInfo::term(
        TargetKind::TermLabel,
        paths::label("en"),
        "en",
        Some("name".to_string()),
    );

    let issues = detect_invalid_mappings(&existing, &candidate);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::DuplicateLanguageMapping);
}

#[test]
fn schema_check_feeds_the_ledger() {
    let schema: ItemSchema = serde_json::from_str(
        r#"{
            "name": "Books",
            "item": {
                "terms": {"labels": {"en": {"mappingType": "column",
                    "source": {"columnName": "title", "storageType": "TEXT"},
                    "resolvedType": "string"}}},
                "statements": [
                    {"property": {"id": "P50"}, "value": {"mappingType": "column",
                        "source": {"columnName": "author", "storageType": "TEXT"},
                        "resolvedType": "string"}},
                    {"property": {"id": "P50"}, "value": {"mappingType": "column",
                        "source": {"columnName": "editor", "storageType": "TEXT"},
                        "resolvedType": "string"}}
                ]
            }
        }"#,
    )
    .expect("schema json");

    let mut ledger = ValidationLedger::new();
    check_completeness(&schema, &item_rules(&schema)).apply_to_ledger(&mut ledger);
    ledger.extend(detect_all(&schema.mapping_infos()));

    let codes: Vec<(&str, IssueCode)> = ledger
        .iter()
        .map(|issue| (issue.path.as_str(), issue.code))
        .collect();
    assert_eq!(
        codes,
        vec![
            (
                "item.statements[1].value",
                IssueCode::DuplicatePropertyMapping
            ),
            ("wikibase", IssueCode::MissingItemConfiguration),
        ]
    );

    let mut fixed = schema.clone();
    fixed.wikibase = Some("https://www.wikidata.org".to_string());
    fixed.item.statements[1].value = Some(ValueMapping::constant("Q5", SemanticType::WikibaseItem));
    check_completeness(&fixed, &item_rules(&fixed)).apply_to_ledger(&mut ledger);
    assert!(ledger.errors_for_path(&paths::wikibase()).is_empty());
}
