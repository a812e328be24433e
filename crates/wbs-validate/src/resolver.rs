//! Compatibility decisions between a storage type and a target's accepted types.

use std::collections::BTreeSet;

use wbs_model::SemanticType;

use crate::compat::{compatible_types, normalize_storage_type, storage_family};

/// True iff the storage type maps to at least one accepted semantic type.
pub fn is_compatible(storage_type: &str, accepted: &BTreeSet<SemanticType>) -> bool {
    !compatible_types(storage_type).is_disjoint(accepted)
}

/// Semantic type a committed mapping should carry: the first accepted type in
/// the storage family's preference order.
pub fn resolve_type(storage_type: &str, accepted: &BTreeSet<SemanticType>) -> Option<SemanticType> {
    storage_family(storage_type)?
        .semantic_types()
        .iter()
        .copied()
        .find(|ty| accepted.contains(ty))
}

/// Human-readable reason for a compatibility decision.
///
/// Meant for the incompatible case; for compatible pairs it names the type
/// the mapping would resolve to.
pub fn explain(storage_type: &str, accepted: &BTreeSet<SemanticType>) -> String {
    let normalized = normalize_storage_type(storage_type);
    if accepted.is_empty() {
        return "Target does not accept any data type".to_string();
    }
    let accepted_list = join_types(accepted.iter().copied());

    let Some(family) = storage_family(storage_type) else {
        return format!(
            "Column type '{}' is not recognized and cannot be mapped to {accepted_list}",
            storage_type.trim()
        );
    };

    match resolve_type(storage_type, accepted) {
        Some(resolved) => format!("Column type {normalized} is compatible with {resolved}"),
        None => format!(
            "Column type {normalized} ({family}) is not compatible with {accepted_list}; \
             it can only be mapped to {}",
            join_types(family.semantic_types().iter().copied())
        ),
    }
}

fn join_types(types: impl Iterator<Item = SemanticType>) -> String {
    types.map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(types: &[SemanticType]) -> BTreeSet<SemanticType> {
        types.iter().copied().collect()
    }

    #[test]
    fn compatible_iff_intersection() {
        assert!(is_compatible("VARCHAR", &set(&[SemanticType::Url])));
        assert!(is_compatible("integer", &set(&[SemanticType::Quantity, SemanticType::String])));
        assert!(!is_compatible("INTEGER", &set(&[SemanticType::String])));
        assert!(!is_compatible("VARCHAR", &set(&[])));
        assert!(!is_compatible("BLOB", &set(&[SemanticType::String])));
    }

    #[test]
    fn resolve_prefers_family_order() {
        let accepted = set(&[SemanticType::ExternalId, SemanticType::String]);
        assert_eq!(resolve_type("TEXT", &accepted), Some(SemanticType::String));
        let accepted = set(&[SemanticType::Url, SemanticType::ExternalId]);
        assert_eq!(resolve_type("TEXT", &accepted), Some(SemanticType::Url));
        assert_eq!(resolve_type("DATE", &accepted), None);
    }

    #[test]
    fn explanations() {
        let reason = explain("INTEGER", &set(&[SemanticType::String]));
        assert_eq!(
            reason,
            "Column type INTEGER (numeric) is not compatible with string; \
             it can only be mapped to quantity"
        );
        assert!(explain("blob", &set(&[SemanticType::String])).contains("not recognized"));
        assert_eq!(
            explain("TEXT", &set(&[])),
            "Target does not accept any data type"
        );
        assert_eq!(
            explain("text", &set(&[SemanticType::MonolingualText])),
            "Column type TEXT is compatible with monolingualtext"
        );
    }
}
