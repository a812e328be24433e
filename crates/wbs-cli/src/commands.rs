use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use wbs_map::{MappingSurface, SurfaceStatus};
use wbs_model::{ColumnDescriptor, ItemSchema, SchemaTarget, ValidationOptions};
use wbs_validate::{
    ValidationLedger, check_completeness, compatible_types, detect_all, item_rules,
    normalize_storage_type, storage_family,
};

use crate::types::{CheckResult, ColumnTargets, CompatReport};

/// Load validation options from `path`, or the defaults when none is given.
pub fn load_options(path: Option<&Path>) -> Result<ValidationOptions> {
    match path {
        Some(path) => {
            let options: ValidationOptions = read_json(path, "validation options")?;
            debug!(path = %path.display(), ?options, "loaded validation options");
            Ok(options)
        }
        None => Ok(ValidationOptions::default()),
    }
}

pub fn run_compat(storage_type: &str) -> CompatReport {
    CompatReport {
        storage_type: storage_type.to_string(),
        normalized: normalize_storage_type(storage_type),
        family: storage_family(storage_type),
        compatible: compatible_types(storage_type).into_iter().collect(),
    }
}

/// Simulate picking up each column and rank every target for it.
pub fn run_targets(
    targets_path: &Path,
    columns_path: &Path,
    only_column: Option<&str>,
    options: &ValidationOptions,
) -> Result<Vec<ColumnTargets>> {
    let targets: Vec<SchemaTarget> = read_json(targets_path, "schema targets")?;
    let columns: Vec<ColumnDescriptor> = read_json(columns_path, "column descriptors")?;

    let names: Vec<String> = match only_column {
        Some(name) => {
            if !columns.iter().any(|column| column.name == name) {
                bail!(
                    "column '{name}' not found in {}",
                    columns_path.display()
                );
            }
            vec![name.to_string()]
        }
        None => columns.iter().map(|column| column.name.clone()).collect(),
    };

    let mut surface = MappingSurface::new(targets, columns, options.clone())
        .with_context(|| format!("load targets from {}", targets_path.display()))?;
    info!(
        targets = surface.targets().len(),
        columns = names.len(),
        "simulating pick-up"
    );

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let valid_targets = surface
            .pick_up(&name)
            .with_context(|| format!("pick up column '{name}'"))?
            .to_vec();
        surface.cancel();
        let suggestions = surface
            .suggestions_for(&name)
            .with_context(|| format!("rank targets for column '{name}'"))?;
        let storage_type = surface
            .column(&name)
            .map(|column| column.storage_type.clone())
            .unwrap_or_default();
        results.push(ColumnTargets {
            column: name,
            storage_type,
            valid_targets,
            suggestions,
        });
    }
    Ok(results)
}

/// Run completeness and duplicate detection over a saved item schema.
pub fn run_check(schema_path: &Path) -> Result<CheckResult> {
    let schema: ItemSchema = read_json(schema_path, "item schema")?;
    if schema.is_empty() {
        info!(path = %schema_path.display(), "schema is empty");
        return Ok(CheckResult::not_started(schema_path.to_path_buf()));
    }

    let span = info_span!("check", schema = %schema.name);
    let _guard = span.enter();

    let rules = item_rules(&schema);
    let report = check_completeness(&schema, &rules);
    let mut ledger = ValidationLedger::new();
    report.apply_to_ledger(&mut ledger);

    let infos = schema.mapping_infos();
    let duplicates = detect_all(&infos);
    debug!(
        slots = infos.len(),
        duplicates = duplicates.len(),
        "duplicate detection finished"
    );
    ledger.extend(duplicates);

    let counts = ledger.counts();
    let has_errors = ledger.has_errors();
    info!(
        errors = counts.errors,
        warnings = counts.warnings,
        "schema checked"
    );

    Ok(CheckResult {
        schema_file: schema_path.to_path_buf(),
        schema_name: schema.name.clone(),
        status: if has_errors {
            SurfaceStatus::Incomplete
        } else {
            SurfaceStatus::Complete
        },
        mapped_slots: infos.len(),
        rules_checked: report.checked_paths.len(),
        counts,
        issues: ledger.all_issues(),
        has_errors,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read {what} from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {what} in {}", path.display()))
}
