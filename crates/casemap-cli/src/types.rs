use std::fmt;
use std::path::PathBuf;

use casemap_rules::Diagnostic;
use serde::Serialize;

/// Outcome of one field in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Rules written; no materializer configured.
    Generated,
    /// Rules written and materialized.
    Materialized,
    Failed,
}

impl FieldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Generated => "generated",
            FieldStatus::Materialized => "materialized",
            FieldStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldOutcome {
    pub field_id: String,
    pub rows: usize,
    pub blocks: usize,
    pub status: FieldStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldOutcome {
    pub fn new(field_id: impl Into<String>, rows: usize) -> Self {
        Self {
            field_id: field_id.into(),
            rows,
            blocks: 0,
            status: FieldStatus::Generated,
            csv: None,
            rules: None,
            instances: None,
            diagnostics: Vec::new(),
            error: None,
        }
    }
}

/// Result of `casemap run`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub project: PathBuf,
    pub fields: Vec<FieldOutcome>,
    /// Fields skipped because a row has no pattern type.
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.status == FieldStatus::Failed)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Result of `casemap preprocess`.
#[derive(Debug, Clone)]
pub struct PreprocessSummary {
    pub cases: usize,
    pub definitions: usize,
    pub rows: usize,
    pub output: PathBuf,
}

/// Result of `casemap rules`.
#[derive(Debug, Clone)]
pub struct RulesSummary {
    pub rows: usize,
    pub blocks: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub output: PathBuf,
}
