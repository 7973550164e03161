//! Rule-template handlers.
//!
//! Each handler renders at most one block from a single normalized row. They
//! share no state, so rendering a row never depends on rows rendered before.

mod observation;
mod procedure;
mod situation;

use std::fmt;

use casemap_model::{NormalizedRow, ValueType, columns};

use crate::block::{FunctionCall, RuleBlock, placeholder};
use crate::uri::extract_last_part;

pub use observation::{observation_result_statement, primitive_value};
pub use procedure::{clinical_procedure_statement, procedure_reference, represented_procedure};
pub use situation::clinical_situation_statement;

/// One rule-template handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTemplate {
    ObservationResultStatement,
    ProcedureReference,
    PrimitiveValue,
    ClinicalSituationStatement,
    ClinicalProcedureStatement,
    RepresentedProcedure,
}

impl RuleTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTemplate::ObservationResultStatement => "observation-result statement",
            RuleTemplate::ProcedureReference => "procedure reference",
            RuleTemplate::PrimitiveValue => "primitive value",
            RuleTemplate::ClinicalSituationStatement => "clinical-situation statement",
            RuleTemplate::ClinicalProcedureStatement => "clinical-procedure statement",
            RuleTemplate::RepresentedProcedure => "represented procedure",
        }
    }

    /// Render this handler for `row`; `None` when the handler has nothing to
    /// emit for it.
    pub fn render(self, row: &NormalizedRow, source: &str) -> Option<RuleBlock> {
        let terms = RowTerms::new(row);
        match self {
            RuleTemplate::ObservationResultStatement => {
                Some(observation_result_statement(&terms, source))
            }
            RuleTemplate::ProcedureReference => procedure_reference(&terms, source),
            RuleTemplate::PrimitiveValue => Some(primitive_value(&terms, source)),
            RuleTemplate::ClinicalSituationStatement => {
                Some(clinical_situation_statement(&terms, source))
            }
            RuleTemplate::ClinicalProcedureStatement => {
                Some(clinical_procedure_statement(&terms, source))
            }
            RuleTemplate::RepresentedProcedure => represented_procedure(&terms, source),
        }
    }
}

impl fmt::Display for RuleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed row values the handlers interpolate into blocks.
#[derive(Debug, Clone)]
pub struct RowTerms<'a> {
    pub field_id: &'a str,
    pub value_type: &'a ValueType,
    pub ontology_mapping: &'a str,
    pub categorical_ontology_mapping: &'a str,
    pub observable: &'a str,
    pub source_procedure: &'a str,
    pub procedure: &'a str,
    pub procedure_result: &'a str,
    pub field_value: String,
}

impl<'a> RowTerms<'a> {
    pub fn new(row: &'a NormalizedRow) -> Self {
        let definition = &row.definition;
        Self {
            field_id: definition.field_id.trim(),
            value_type: &definition.value_type,
            ontology_mapping: definition.ontology_mapping.trim(),
            categorical_ontology_mapping: definition
                .categorical_ontology_mapping
                .as_deref()
                .unwrap_or("")
                .trim(),
            observable: definition.observable.trim(),
            source_procedure: definition.source_procedure.trim(),
            procedure: definition.procedure.trim(),
            procedure_result: row.procedure_result.as_deref().unwrap_or("").trim(),
            field_value: row.field_value.to_string().trim().to_string(),
        }
    }
}

/// `stratifai-function:<name>`
pub(crate) fn stratifai_function(name: &str) -> FunctionCall {
    FunctionCall::new(format!("stratifai-function:{name}"))
}

/// `grel:valueParam`, `grel:valueParam1`, ...
pub(crate) fn value_param(index: usize) -> String {
    if index == 0 {
        "grel:valueParam".to_string()
    } else {
        format!("grel:valueParam{index}")
    }
}

/// Subject of the procedure a statement is the result of.
fn procedure_subject(source_procedure: &str) -> String {
    format!(
        "base:Procedure_{}_{}",
        extract_last_part(source_procedure),
        placeholder(columns::CASE_ID)
    )
}

/// Per-case IRI built from the local name of `column`'s value.
fn extract_last_part_call(column: &str) -> FunctionCall {
    stratifai_function("extract_last_part")
        .param(value_param(0), placeholder(column))
        .param(value_param(1), placeholder(columns::CASE_ID))
}

/// `scdm:temporalContext` object shared by statement blocks.
fn temporal_context_call() -> FunctionCall {
    stratifai_function("add_temporal_context")
        .param(value_param(0), placeholder(columns::TEMPORAL_CONTEXT))
}
