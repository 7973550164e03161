//! Rule document assembly.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;

use casemap_model::NormalizedRow;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::block::RuleBlock;
use crate::header::render_header;
use crate::pattern::templates_for;

/// Non-fatal finding reported while generating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The field's pattern type selects no templates; it contributed no rules.
    UnknownPatternType { field_id: String, label: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownPatternType { field_id, label } => {
                write!(f, "unknown or unhandled pattern type '{label}' for field '{field_id}'")
            }
        }
    }
}

/// An assembled rule document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub text: String,
    /// Number of field rule blocks, header blocks excluded.
    pub block_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render every template of `row`'s pattern type.
///
/// Fails with a diagnostic when the pattern type is unrecognized.
pub fn render_row(row: &NormalizedRow, source: &str) -> Result<Vec<RuleBlock>, Diagnostic> {
    let pattern = &row.definition.pattern_type;
    let Some(templates) = templates_for(pattern) else {
        return Err(Diagnostic::UnknownPatternType {
            field_id: row.definition.field_id.trim().to_string(),
            label: pattern.as_str().to_string(),
        });
    };
    Ok(templates
        .iter()
        .filter_map(|template| template.render(row, source))
        .collect())
}

/// Assemble the document for `rows` read from `source`.
///
/// Only the first row of each field identifier is rendered. The text is the
/// header followed by the fields' blocks in processing order; identical
/// inputs give identical output.
pub fn generate_document(rows: &[NormalizedRow], source: &str) -> GeneratedDocument {
    let span = info_span!("rules", source = %source, rows = rows.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut fields: Vec<String> = Vec::new();
    let mut block_count = 0;
    let mut diagnostics = Vec::new();

    for row in rows {
        let field_id = row.definition.field_id.trim();
        if !seen.insert(field_id) {
            continue;
        }
        match render_row(row, source) {
            Ok(blocks) => {
                debug!(field_id, blocks = blocks.len(), "rendered field");
                if blocks.is_empty() {
                    continue;
                }
                block_count += blocks.len();
                let text: Vec<String> = blocks.iter().map(RuleBlock::to_string).collect();
                fields.push(text.join("\n"));
            }
            Err(diagnostic) => {
                warn!(field_id, "{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }
    }

    let mut text = render_header(source);
    text.push_str(&fields.join("\n"));

    info!(
        fields = seen.len(),
        blocks = block_count,
        diagnostics = diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "rule document assembled"
    );
    GeneratedDocument {
        text,
        block_count,
        diagnostics,
    }
}
