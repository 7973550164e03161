//! Per-field batch generation over a project directory.
//!
//! ```text
//! <project>/
//!   preprocessed_data/preprocessed_data.csv   input
//!   csv/<field>.csv                           per-field export
//!   rules/<field>_rules.yarrrml               generated rules
//!   instances/<field>_output.ttl              materializer output
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use casemap_ingest::{FieldGroup, FileStems, export_group, group_by_field, load_normalized_table};
use casemap_rules::generate_document;
use tracing::{debug, error, info, info_span, trace, warn};

use crate::logging::redact_value;
use crate::types::{BatchReport, FieldOutcome, FieldStatus};

pub const PREPROCESSED_DIR: &str = "preprocessed_data";
pub const PREPROCESSED_FILE: &str = "preprocessed_data.csv";
pub const CSV_DIR: &str = "csv";
pub const RULES_DIR: &str = "rules";
pub const INSTANCES_DIR: &str = "instances";

/// Directory layout of a batch project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn preprocessed_dir(&self) -> PathBuf {
        self.root.join(PREPROCESSED_DIR)
    }

    pub fn preprocessed_table(&self) -> PathBuf {
        self.preprocessed_dir().join(PREPROCESSED_FILE)
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join(CSV_DIR)
    }

    pub fn rules_dir(&self) -> PathBuf {
        self.root.join(RULES_DIR)
    }

    pub fn instances_dir(&self) -> PathBuf {
        self.root.join(INSTANCES_DIR)
    }

    /// Rules file for a field's claimed file stem.
    pub fn rules_file(&self, stem: &str) -> PathBuf {
        self.rules_dir().join(format!("{stem}_rules.yarrrml"))
    }

    pub fn instances_file(&self, stem: &str) -> PathBuf {
        self.instances_dir().join(format!("{stem}_output.ttl"))
    }

    /// Create every working directory that does not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.preprocessed_dir(),
            self.csv_dir(),
            self.rules_dir(),
            self.instances_dir(),
        ] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Turns a rule document into RDF.
pub trait Materializer {
    /// Materialize `rules` into the Turtle file `output`.
    fn materialize(&self, rules: &Path, output: &Path) -> Result<()>;
}

/// External materializer run as `<program> [args..] <rules> <output>`.
///
/// The program and each argument are passed as given, without shell
/// splitting, so paths may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMaterializer {
    program: String,
    args: Vec<String>,
}

impl CommandMaterializer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            bail!("materializer command is empty");
        }
        Ok(Self { program, args })
    }
}

impl Materializer for CommandMaterializer {
    fn materialize(&self, rules: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(rules)
            .arg(output)
            .output()
            .with_context(|| format!("run materializer {}", self.program))?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            bail!(
                "materializer {} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}

fn process_field(
    layout: &ProjectLayout,
    columns: &[String],
    stem: &str,
    group: &FieldGroup,
    materializer: Option<&dyn Materializer>,
    outcome: &mut FieldOutcome,
) -> Result<()> {
    let csv = export_group(&layout.csv_dir(), stem, columns, group)
        .with_context(|| format!("export rows of field {}", group.field_id))?;
    outcome.csv = Some(csv.clone());
    for row in &group.rows {
        trace!(
            case_id = %redact_value(&row.case_id),
            value = %redact_value(&row.field_value.to_string()),
            "exported row"
        );
    }

    let document = generate_document(&group.rows, &csv.display().to_string());
    outcome.blocks = document.block_count;
    outcome.diagnostics = document.diagnostics;

    let rules = layout.rules_file(stem);
    fs::write(&rules, &document.text)
        .with_context(|| format!("write rules {}", rules.display()))?;
    outcome.rules = Some(rules.clone());

    if let Some(materializer) = materializer {
        let instances = layout.instances_file(stem);
        materializer
            .materialize(&rules, &instances)
            .with_context(|| format!("materialize field {}", group.field_id))?;
        outcome.instances = Some(instances);
        outcome.status = FieldStatus::Materialized;
    }
    Ok(())
}

/// Generate rules for every field of the project's preprocessed table.
///
/// A failure inside one field is recorded on that field's outcome and the
/// batch moves on. Only failures before the per-field loop are returned as
/// errors.
pub fn run_batch(layout: &ProjectLayout, materializer: Option<&dyn Materializer>) -> Result<BatchReport> {
    let span = info_span!("batch", project = %layout.root().display());
    let _guard = span.enter();
    let start = Instant::now();

    layout.ensure_dirs()?;
    let source = layout.preprocessed_table();
    let table = load_normalized_table(&source)
        .with_context(|| format!("load preprocessed table {}", source.display()))?;

    let mut report = BatchReport {
        project: layout.root().to_path_buf(),
        fields: Vec::new(),
        skipped: Vec::new(),
    };
    let mut stems = FileStems::new();
    for group in group_by_field(&table) {
        if group.has_blank_pattern() {
            debug!(field_id = %group.field_id, "skipping field without pattern type");
            report.skipped.push(group.field_id);
            continue;
        }
        let field_span = info_span!("field", field_id = %group.field_id, rows = group.rows.len());
        let _field_guard = field_span.enter();

        let stem = stems.claim(&group.field_id);
        debug!(stem = %stem, "file stem");
        let mut outcome = FieldOutcome::new(group.field_id.clone(), group.rows.len());
        if let Err(err) = process_field(layout, &table.columns, &stem, &group, materializer, &mut outcome) {
            error!(field_id = %group.field_id, error = %format!("{err:#}"), "field failed");
            outcome.status = FieldStatus::Failed;
            outcome.error = Some(format!("{err:#}"));
        } else if !outcome.diagnostics.is_empty() {
            warn!(
                field_id = %group.field_id,
                diagnostics = outcome.diagnostics.len(),
                "field produced diagnostics"
            );
        }
        report.fields.push(outcome);
    }

    info!(
        fields = report.fields.len(),
        skipped = report.skipped.len(),
        failed = report.failed_count(),
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materializer_keeps_program_and_args_verbatim() {
        let command = CommandMaterializer::new(
            "/opt/rdf tools/morph-kgc",
            vec!["--format".to_string(), "turtle out".to_string()],
        )
        .expect("command");
        assert_eq!(command.program, "/opt/rdf tools/morph-kgc");
        assert_eq!(command.args, vec!["--format", "turtle out"]);
        assert!(CommandMaterializer::new("   ", Vec::new()).is_err());
    }

    #[test]
    fn layout_paths() {
        let layout = ProjectLayout::new("/tmp/project");
        assert_eq!(
            layout.preprocessed_table(),
            Path::new("/tmp/project/preprocessed_data/preprocessed_data.csv")
        );
        assert_eq!(
            layout.rules_file("bp_sys"),
            Path::new("/tmp/project/rules/bp_sys_rules.yarrrml")
        );
        assert_eq!(
            layout.instances_file("weight"),
            Path::new("/tmp/project/instances/weight_output.ttl")
        );
    }
}
