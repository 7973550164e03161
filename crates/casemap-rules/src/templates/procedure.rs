use casemap_model::columns;

use super::{
    RowTerms, extract_last_part_call, procedure_subject, stratifai_function, value_param,
};
use crate::block::{FunctionCall, RuleBlock, iri, placeholder};

/// Procedure values that describe an aspect of a procedure rather than the
/// procedure itself.
const PROCEDURE_ASPECTS: &[&str] = &[
    "dateTime",
    "procedureReason",
    "procedureLocation",
    "performer",
];

/// Procedure node a statement is the result of.
///
/// Emits nothing when the row names no source procedure.
pub fn procedure_reference(terms: &RowTerms<'_>, source: &str) -> Option<RuleBlock> {
    if terms.source_procedure.is_empty() {
        return None;
    }
    Some(
        RuleBlock::new(
            format!("{}_ResultOfProcedure", terms.ontology_mapping),
            source,
            procedure_subject(terms.source_procedure),
        )
        .pair("a", iri(terms.source_procedure)),
    )
}

fn is_yes_or_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("no")
}

fn represents_procedure(terms: &RowTerms<'_>) -> Option<FunctionCall> {
    if terms.value_type.is_boolean() || is_yes_or_no(&terms.field_value) {
        Some(extract_last_part_call(columns::PROCEDURE))
    } else if !terms.categorical_ontology_mapping.is_empty()
        && !PROCEDURE_ASPECTS.contains(&terms.procedure)
    {
        Some(extract_last_part_call(columns::CATEGORICAL_ONTOLOGY_MAPPING))
    } else {
        None
    }
}

/// Clinical-procedure statement with its context, reason, location,
/// performer and date-time links.
pub fn clinical_procedure_statement(terms: &RowTerms<'_>, source: &str) -> RuleBlock {
    let RowTerms {
        ontology_mapping,
        field_id,
        ..
    } = *terms;
    let procedure = placeholder(columns::PROCEDURE);

    let block = RuleBlock::new(
        format!("{ontology_mapping}_{field_id}_ClinicalProcedureStatement"),
        source,
        format!(
            "base:ClinicalProcedureSt_{ontology_mapping}_{field_id}_{}",
            placeholder(columns::CASE_ID)
        ),
    )
    .pair("a", iri(format_args!("stratifai:{ontology_mapping}")))
    .pair(
        "scdm:isResultOf",
        iri(procedure_subject(terms.source_procedure)),
    )
    .function(
        "scdm:procedureContext",
        stratifai_function("add_procedure_statement_context")
            .param(value_param(0), placeholder(columns::VALUE_TYPE))
            .param(value_param(2), placeholder(columns::FIELD_VALUE))
            .param(
                value_param(3),
                placeholder(columns::CATEGORICAL_ONTOLOGY_MAPPING),
            ),
    )
    .function(
        "scdm:procedureReason",
        stratifai_function("add_procedure_reason")
            .param(value_param(0), procedure.clone())
            .param(value_param(1), placeholder(columns::PROCEDURE_REASON)),
    )
    .function(
        "scdm:procedureLocation",
        stratifai_function("add_procedure_location")
            .param(value_param(0), procedure.clone())
            .param(value_param(1), placeholder(columns::PROCEDURE_LOCATION)),
    )
    .function(
        "scdm:hasInformationAboutProvider",
        stratifai_function("add_procedure_performer").param(value_param(0), procedure.clone()),
    )
    .function(
        "scdm:temporalContext",
        stratifai_function("add_procedure_dateTime")
            .param(value_param(0), procedure)
            .param(
                value_param(1),
                placeholder(columns::CATEGORICAL_ONTOLOGY_MAPPING),
            ),
    );

    match represents_procedure(terms) {
        Some(call) => block.function("scdm:representsProcedure", call),
        None => block,
    }
}

/// The procedure a procedure statement represents, typed dynamically.
///
/// Emits nothing when the row has neither a categorical term nor an IRI-like
/// procedure.
pub fn represented_procedure(terms: &RowTerms<'_>, source: &str) -> Option<RuleBlock> {
    if terms.categorical_ontology_mapping.is_empty() && !terms.procedure.contains("http") {
        return None;
    }
    let arguments = [
        columns::VALUE_TYPE,
        columns::PROCEDURE,
        columns::FIELD_VALUE,
        columns::CATEGORICAL_ONTOLOGY_MAPPING,
    ];
    let with_arguments = |call: FunctionCall| {
        arguments
            .iter()
            .enumerate()
            .fold(call, |call, (idx, column)| {
                call.param(value_param(idx), placeholder(column))
            })
    };
    let subject = with_arguments(stratifai_function("generateDynamicSubject"))
        .param(value_param(arguments.len()), placeholder(columns::CASE_ID));
    Some(
        RuleBlock::with_subject_function(
            format!("{}_RepresentedProcedure", terms.ontology_mapping),
            source,
            subject,
        )
        .function(
            "rdf:type",
            with_arguments(stratifai_function("generateDynamicObject")),
        ),
    )
}
