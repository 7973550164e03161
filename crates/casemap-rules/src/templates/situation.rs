use casemap_model::{ValueType, columns};

use super::{
    RowTerms, extract_last_part_call, procedure_subject, stratifai_function,
    temporal_context_call, value_param,
};
use crate::block::{RuleBlock, iri, placeholder};

/// Clinical-situation statement.
///
/// The represented situation is the categorical term for categorical fields
/// that have one, the row's finding otherwise. A resolved procedure result
/// adds a second `scdm:isResultOf` link.
pub fn clinical_situation_statement(terms: &RowTerms<'_>, source: &str) -> RuleBlock {
    let subject = format!(
        "base:ClinicalSituationSt_{}_{}_{}",
        placeholder(columns::ONTOLOGY_MAPPING),
        placeholder(columns::FIELD_ID),
        placeholder(columns::CASE_ID)
    );
    let situation_context = stratifai_function("add_situation_context")
        .param(value_param(0), placeholder(columns::VALUE_TYPE))
        .param(value_param(1), placeholder(columns::FIELD_VALUE))
        .param(value_param(2), placeholder(columns::STATEMENT_CONTEXT));

    let represented = if *terms.value_type == ValueType::Categorical
        && !terms.categorical_ontology_mapping.is_empty()
    {
        columns::CATEGORICAL_ONTOLOGY_MAPPING
    } else {
        columns::FINDING
    };

    let block = RuleBlock::new(
        format!("{}_ClinicalSituationStatement", terms.ontology_mapping),
        source,
        subject,
    )
    .pair(
        "a",
        iri(format_args!("stratifai:{}", terms.ontology_mapping)),
    )
    .pair(
        "scdm:isResultOf",
        iri(procedure_subject(terms.source_procedure)),
    )
    .function("scdm:temporalContext", temporal_context_call())
    .function("scdm:situationContext", situation_context)
    .pair("scdm:representsSituation", iri(placeholder(represented)));

    if terms.procedure_result.is_empty() {
        block
    } else {
        block.function(
            "scdm:isResultOf",
            extract_last_part_call(columns::PROCEDURE_RESULT),
        )
    }
}
