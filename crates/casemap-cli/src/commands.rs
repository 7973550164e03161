use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use casemap_cli::batch::{CommandMaterializer, Materializer, ProjectLayout, run_batch};
use casemap_cli::logging::redact_value;
use casemap_cli::types::{BatchReport, PreprocessSummary, RulesSummary};
use casemap_ingest::{
    load_data_table, load_mapping_table, load_normalized_table, trim_mapping_table,
    write_normalized_table,
};
use casemap_preprocess::process_data;
use casemap_rules::generate_document;
use tracing::{info, info_span, trace};

use crate::cli::{PreprocessArgs, RulesArgs, RunArgs};

pub fn run_preprocess(args: &PreprocessArgs) -> Result<PreprocessSummary> {
    let span = info_span!("preprocess_command", data = %args.data.display());
    let _guard = span.enter();
    let start = Instant::now();

    let data = load_data_table(&args.data)
        .with_context(|| format!("load data table {}", args.data.display()))?;
    let mapping = load_mapping_table(&args.mapping)
        .with_context(|| format!("load mapping table {}", args.mapping.display()))?;
    let mapping = trim_mapping_table(mapping);

    let table = process_data(&data, &mapping).context("preprocess tables")?;
    for row in &table.rows {
        trace!(
            case_id = %redact_value(&row.case_id),
            field_id = %row.definition.field_id,
            value = %redact_value(&row.field_value.to_string()),
            "normalized row"
        );
    }
    write_normalized_table(&args.output, &table)
        .with_context(|| format!("write normalized table {}", args.output.display()))?;

    info!(
        cases = data.len(),
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalized table written"
    );
    Ok(PreprocessSummary {
        cases: data.len(),
        definitions: mapping.len(),
        rows: table.len(),
        output: args.output.clone(),
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<RulesSummary> {
    let table = load_normalized_table(&args.input)
        .with_context(|| format!("load normalized table {}", args.input.display()))?;
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| args.input.display().to_string());

    let document = generate_document(&table.rows, &source);
    fs::write(&args.output, &document.text)
        .with_context(|| format!("write rules {}", args.output.display()))?;

    Ok(RulesSummary {
        rows: table.len(),
        blocks: document.block_count,
        diagnostics: document.diagnostics,
        output: args.output.clone(),
    })
}

pub fn run_project(args: &RunArgs) -> Result<BatchReport> {
    let materializer = args
        .materializer
        .as_deref()
        .map(|program| CommandMaterializer::new(program, args.materializer_args.clone()))
        .transpose()
        .context("parse materializer command")?;
    let layout = ProjectLayout::new(&args.project);
    run_batch(
        &layout,
        materializer.as_ref().map(|m| m as &dyn Materializer),
    )
}
