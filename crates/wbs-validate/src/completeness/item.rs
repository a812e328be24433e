//! Built-in rules for an [`ItemSchema`] document.

use wbs_model::{
    ItemSchema, PropertyValueMapping, SchemaPath, ValueMapping, is_valid_language_code,
    is_valid_property_id, paths,
};

use super::CompletenessRule;
use crate::issue::{IssueCode, Severity};

/// Rules for the given schema's current shape.
///
/// Rules are generated per language key and per statement, qualifier and
/// reference snak present in `schema`, so the list must be rebuilt after the
/// schema's structure changes.
pub fn item_rules(schema: &ItemSchema) -> Vec<CompletenessRule<ItemSchema>> {
    let mut rules = vec![
        CompletenessRule::new(
            paths::name(),
            IssueCode::MissingItemConfiguration,
            "Schema name is required",
            |s: &ItemSchema| !s.name.trim().is_empty(),
        ),
        CompletenessRule::new(
            paths::wikibase(),
            IssueCode::MissingItemConfiguration,
            "Target Wikibase instance is not configured",
            |s: &ItemSchema| s.wikibase.as_deref().is_some_and(|w| !w.trim().is_empty()),
        ),
        CompletenessRule::new(
            paths::labels(),
            IssueCode::MissingRequiredMapping,
            "At least one label mapping is required",
            |s: &ItemSchema| !s.item.terms.labels.is_empty(),
        ),
    ];

    let terms = &schema.item.terms;
    let language_keys = terms
        .labels
        .keys()
        .map(|lang| (lang, paths::label(lang)))
        .chain(terms.descriptions.keys().map(|lang| (lang, paths::description(lang))))
        .chain(terms.aliases.keys().map(|lang| (lang, paths::alias_language(lang))));
    for (lang, path) in language_keys {
        let valid = is_valid_language_code(lang);
        rules.push(CompletenessRule::new(
            path,
            IssueCode::InvalidLanguageCode,
            format!("'{lang}' is not a valid language code"),
            move |_: &ItemSchema| valid,
        ));
    }

    for (s_idx, statement) in schema.item.statements.iter().enumerate() {
        rules.push(CompletenessRule::new(
            paths::statement_property(s_idx),
            IssueCode::InvalidPropertyId,
            format!("Statement {} needs a valid property", s_idx + 1),
            move |s: &ItemSchema| {
                s.item
                    .statements
                    .get(s_idx)
                    .and_then(|st| st.property.as_ref())
                    .is_some_and(|p| is_valid_property_id(&p.id))
            },
        ));
        rules.push(CompletenessRule::new(
            paths::statement_value(s_idx),
            IssueCode::MissingStatementValue,
            format!("Statement {} has no value mapping", s_idx + 1),
            move |s: &ItemSchema| {
                s.item
                    .statements
                    .get(s_idx)
                    .is_some_and(|st| has_value(st.value.as_ref()))
            },
        ));

        for q_idx in 0..statement.qualifiers.len() {
            let path = paths::qualifier(s_idx, q_idx);
            let lookup = move |s: &ItemSchema| {
                s.item
                    .statements
                    .get(s_idx)
                    .and_then(|st| st.qualifiers.get(q_idx))
                    .cloned()
            };
            push_snak_rules(&mut rules, path, "Qualifier", lookup);
        }

        for (r_idx, reference) in statement.references.iter().enumerate() {
            for n_idx in 0..reference.snaks.len() {
                let path = paths::reference_snak(s_idx, r_idx, n_idx);
                let lookup = move |s: &ItemSchema| {
                    s.item
                        .statements
                        .get(s_idx)
                        .and_then(|st| st.references.get(r_idx))
                        .and_then(|r| r.snaks.get(n_idx))
                        .cloned()
                };
                push_snak_rules(&mut rules, path, "Reference", lookup);
            }
        }
    }

    rules
}

fn has_value(value: Option<&ValueMapping>) -> bool {
    value.is_some_and(ValueMapping::has_source)
}

/// Property and value rules for a qualifier or reference snak. A missing
/// value here is a warning.
fn push_snak_rules<F>(
    rules: &mut Vec<CompletenessRule<ItemSchema>>,
    path: SchemaPath,
    label: &str,
    lookup: F,
) where
    F: Fn(&ItemSchema) -> Option<PropertyValueMapping> + Clone + Send + Sync + 'static,
{
    let property_lookup = lookup.clone();
    rules.push(CompletenessRule::new(
        path.clone(),
        IssueCode::InvalidPropertyId,
        format!("{label} at {path} needs a valid property"),
        move |s: &ItemSchema| {
            property_lookup(s)
                .and_then(|snak| snak.property)
                .is_some_and(|p| is_valid_property_id(&p.id))
        },
    ));
    rules.push(
        CompletenessRule::new(
            path.clone(),
            IssueCode::MissingStatementValue,
            format!("{label} at {path} has no value mapping"),
            move |s: &ItemSchema| lookup(s).is_some_and(|snak| has_value(snak.value.as_ref())),
        )
        .with_severity(Severity::Warning),
    );
}
