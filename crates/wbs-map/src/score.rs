//! Ranking drop targets for a column.
//!
//! Uses Jaro-Winkler similarity between the column name and the target's
//! display name, adjusted for language hints and type compatibility.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;
use wbs_model::{ColumnDescriptor, SchemaPath, SchemaTarget, ValidationOptions};
use wbs_validate::{ValidationResult, validate};

/// Score for a single column-target pair.
#[derive(Debug, Clone, Serialize)]
pub struct TargetScore {
    /// Final confidence score (0.0 to 1.0, may slightly exceed 1.0 with boosts).
    pub score: f32,
    /// Breakdown of score components for explainability.
    pub explanation: Vec<ScoreComponent>,
}

impl TargetScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:.0}%", c.name, c.value * 100.0))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A component contributing to the final score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    /// Can be negative for penalties.
    pub value: f32,
    pub description: String,
}

/// A ranked target with its validation outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSuggestion {
    pub path: SchemaPath,
    pub display_name: String,
    pub score: TargetScore,
    pub validation: ValidationResult,
}

impl TargetSuggestion {
    pub fn is_droppable(&self) -> bool {
        self.validation.is_valid
    }
}

/// Score `column` against `target`.
pub fn score_target(
    column: &ColumnDescriptor,
    target: &SchemaTarget,
    validation: &ValidationResult,
) -> TargetScore {
    let mut components = Vec::new();

    // 1. Base: Jaro-Winkler similarity on normalized names
    let normalized_col = normalize(&column.name);
    let normalized_target = normalize(target.display_name());
    let base =
        jaro_winkler::similarity(normalized_col.chars(), normalized_target.chars()) as f32;
    components.push(ScoreComponent {
        name: "Name similarity",
        value: base,
        description: format!("'{}' vs '{}'", column.name, target.display_name()),
    });
    let mut score = base;

    // 2. Language suffix boost (+10%), e.g. "title_en" on an English term
    if let Some(lang) = target.language_code.as_deref()
        && has_language_suffix(&normalized_col, lang)
    {
        score *= 1.10;
        components.push(ScoreComponent {
            name: "Language match",
            value: 0.10,
            description: format!("Column name ends with '{lang}'"),
        });
    }

    // 3. Validation penalty (-60%)
    if !validation.is_valid {
        score *= 0.4;
        components.push(ScoreComponent {
            name: "Not droppable",
            value: -0.6,
            description: validation.message().to_string(),
        });
    }

    TargetScore {
        score,
        explanation: components,
    }
}

/// Rank every target for `column`, best first. Droppable targets always rank
/// ahead of ones that fail validation.
pub fn rank_targets<'a, I>(
    column: &ColumnDescriptor,
    targets: I,
    options: &ValidationOptions,
) -> Vec<TargetSuggestion>
where
    I: IntoIterator<Item = &'a SchemaTarget>,
{
    let mut ranked: Vec<TargetSuggestion> = targets
        .into_iter()
        .map(|target| {
            let validation = validate(column, target, options);
            TargetSuggestion {
                path: target.path.clone(),
                display_name: target.display_name().to_string(),
                score: score_target(column, target, &validation),
                validation,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.is_droppable().cmp(&a.is_droppable()).then_with(|| {
            b.score
                .score
                .partial_cmp(&a.score.score)
                .unwrap_or(Ordering::Equal)
        })
    });
    ranked
}

fn has_language_suffix(normalized_column: &str, lang: &str) -> bool {
    normalized_column
        .rsplit(' ')
        .next()
        .is_some_and(|last| last.eq_ignore_ascii_case(lang))
}

/// Normalize a string for comparison.
///
/// - Trims whitespace
/// - Converts to lowercase
/// - Replaces separators with spaces
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbs_model::{SemanticType, TargetKind, paths};

    #[test]
    fn normalize_handles_separators() {
        assert_eq!(normalize("  Date_of-Birth.x "), "date of birth x");
    }

    #[test]
    fn similar_names_rank_first() {
        let targets = vec![
            SchemaTarget::property(
                TargetKind::StatementValue,
                paths::statement_value(0),
                "P577",
                [SemanticType::String],
            )
            .with_label("publication date"),
            SchemaTarget::property(
                TargetKind::StatementValue,
                paths::statement_value(1),
                "P50",
                [SemanticType::String],
            )
            .with_label("author"),
        ];
        let column = ColumnDescriptor::new("Author_Name", "VARCHAR");
        let ranked = rank_targets(&column, &targets, &ValidationOptions::default());
        assert_eq!(ranked[0].display_name, "author");
        assert!(ranked[0].score.score > ranked[1].score.score);
    }

    #[test]
    fn invalid_targets_rank_last() {
        let targets = vec![
            SchemaTarget::property(
                TargetKind::StatementValue,
                paths::statement_value(0),
                "P1104",
                [SemanticType::Quantity],
            )
            .with_label("title"),
            SchemaTarget::term(TargetKind::TermDescription, paths::description("en"), "en"),
        ];
        let column = ColumnDescriptor::new("title", "TEXT");
        let ranked = rank_targets(&column, &targets, &ValidationOptions::default());
        assert!(ranked[0].is_droppable());
        assert!(!ranked[1].is_droppable());
        assert!(ranked[1].score.explain().contains("Not droppable: -60%"));
    }

    #[test]
    fn language_suffix_boosts_term_targets() {
        let target = SchemaTarget::term(TargetKind::TermLabel, paths::label("de"), "de")
            .with_label("label");
        let valid = ValidationResult::valid();
        let plain = score_target(&ColumnDescriptor::new("label", "TEXT"), &target, &valid);
        let suffixed = score_target(&ColumnDescriptor::new("label_de", "TEXT"), &target, &valid);
        assert!(suffixed.explanation.iter().any(|c| c.name == "Language match"));
        assert!(plain.explanation.iter().all(|c| c.name != "Language match"));
    }
}
