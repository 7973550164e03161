use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use casemap_cli::types::{BatchReport, FieldOutcome, FieldStatus, PreprocessSummary, RulesSummary};
use casemap_rules::Diagnostic;

pub fn print_preprocess_summary(summary: &PreprocessSummary) {
    println!(
        "Normalized {} case(s) against {} definition(s): {} row(s)",
        summary.cases, summary.definitions, summary.rows
    );
    println!("Output: {}", summary.output.display());
}

pub fn print_rules_summary(summary: &RulesSummary) {
    println!(
        "Rendered {} rule block(s) from {} row(s)",
        summary.blocks, summary.rows
    );
    println!("Output: {}", summary.output.display());
    print_diagnostics(summary.diagnostics.iter());
}

pub fn print_batch_summary(report: &BatchReport) {
    println!("Project: {}", report.project.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Rows"),
        header_cell("Blocks"),
        header_cell("Status"),
        header_cell("Rules"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let mut total_rows = 0usize;
    let mut total_blocks = 0usize;
    for field in &report.fields {
        total_rows += field.rows;
        total_blocks += field.blocks;
        table.add_row(vec![
            Cell::new(&field.field_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.rows),
            count_cell(field.blocks),
            status_cell(field.status),
            rules_cell(field),
        ]);
    }
    for field_id in &report.skipped {
        table.add_row(vec![
            dim_cell(field_id),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("skipped").fg(Color::Yellow),
            dim_cell("no pattern type"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_blocks).add_attribute(Attribute::Bold),
        failed_cell(report.failed_count()),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_diagnostics(report.fields.iter().flat_map(|field| field.diagnostics.iter()));
    let failures: Vec<&FieldOutcome> = report
        .fields
        .iter()
        .filter(|field| field.status == FieldStatus::Failed)
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for field in failures {
            eprintln!(
                "- {}: {}",
                field.field_id,
                field.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

fn print_diagnostics<'a>(diagnostics: impl Iterator<Item = &'a Diagnostic>) {
    let mut diagnostics = diagnostics.peekable();
    if diagnostics.peek().is_none() {
        return;
    }
    eprintln!("Warnings:");
    for diagnostic in diagnostics {
        eprintln!("- {diagnostic}");
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: FieldStatus) -> Cell {
    match status {
        FieldStatus::Generated => Cell::new(status).fg(Color::Green),
        FieldStatus::Materialized => Cell::new(status)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        FieldStatus::Failed => Cell::new(status)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn rules_cell(field: &FieldOutcome) -> Cell {
    match field.rules.as_ref().and_then(|path| path.file_name()) {
        Some(name) => Cell::new(name.to_string_lossy()),
        None => dim_cell("-"),
    }
}

fn failed_cell(failed: usize) -> Cell {
    if failed > 0 {
        Cell::new(format!("{failed} failed"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("ok")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
