use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use wbs_map::SurfaceStatus;
use wbs_model::SemanticType;
use wbs_validate::{Severity, ValidationIssue};

use crate::types::{CheckResult, ColumnTargets, CompatReport};

pub fn print_compat(report: &CompatReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Storage type"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Input"), Cell::new(&report.storage_type)]);
    table.add_row(vec![Cell::new("Normalized"), Cell::new(&report.normalized)]);
    table.add_row(vec![
        Cell::new("Family"),
        match report.family {
            Some(family) => Cell::new(family.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            None => Cell::new("not recognized").fg(Color::Red),
        },
    ]);
    let compatible = if report.compatible.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(
            report
                .compatible
                .iter()
                .map(SemanticType::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    };
    table.add_row(vec![Cell::new("Compatible with"), compatible]);
    println!("{table}");
}

pub fn print_targets(results: &[ColumnTargets]) {
    for result in results {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("#"),
            header_cell("Target"),
            header_cell("Path"),
            header_cell("Pick-up"),
            header_cell("Drop"),
            header_cell("Score"),
            header_cell("Reason"),
        ]);
        apply_targets_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Center);
        align_column(&mut table, 4, CellAlignment::Center);
        align_column(&mut table, 5, CellAlignment::Right);

        for (rank, suggestion) in result.suggestions.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&suggestion.display_name),
                dim_cell(&suggestion.path),
                flag_cell(result.lights_up(&suggestion.path)),
                flag_cell(suggestion.is_droppable()),
                Cell::new(format!("{:.2}", suggestion.score.score)),
                reason_cell(suggestion.validation.message(), suggestion.is_droppable()),
            ]);
        }

        println!();
        println!(
            "Column {} ({}): {} of {} targets droppable",
            result.column,
            result.storage_type,
            result
                .suggestions
                .iter()
                .filter(|s| s.is_droppable())
                .count(),
            result.suggestions.len()
        );
        println!("{table}");
    }
}

pub fn print_check_summary(result: &CheckResult) {
    println!("Schema: {}", result.schema_file.display());
    if result.status == SurfaceStatus::NotStarted {
        println!("Status: not started (schema is empty)");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Schema"),
        header_cell("Status"),
        header_cell("Mapped"),
        header_cell("Checked"),
        header_cell("Paths"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(if result.schema_name.is_empty() {
            "-"
        } else {
            result.schema_name.as_str()
        })
        .add_attribute(Attribute::Bold),
        status_cell(result.status),
        Cell::new(result.mapped_slots),
        Cell::new(result.rules_checked),
        Cell::new(result.counts.paths),
        count_cell(result.counts.errors, Color::Red),
        count_cell(result.counts.warnings, Color::Yellow),
    ]);
    println!("{table}");

    print_issue_table(&result.issues);
}

fn print_issue_table(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&ValidationIssue> = issues.iter().collect();
    ordered.sort_by(|a, b| {
        severity_rank(b.severity)
            .cmp(&severity_rank(a.severity))
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Path"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.code.as_str()),
            Cell::new(&issue.path),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_targets_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(3)),
        ColumnConstraint::UpperBoundary(Width::Percentage(20)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::LowerBoundary(Width::Fixed(4)),
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
    ]);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(9)),
        ColumnConstraint::UpperBoundary(Width::Fixed(28)),
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::UpperBoundary(Width::Percentage(55)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: SurfaceStatus) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        SurfaceStatus::Complete => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        SurfaceStatus::Incomplete => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        SurfaceStatus::NotStarted => cell.fg(Color::DarkGrey),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red)
    }
}

fn reason_cell(message: &str, droppable: bool) -> Cell {
    if droppable {
        dim_cell(message)
    } else {
        Cell::new(message)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 2,
        Severity::Warning => 1,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
