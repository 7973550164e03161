use casemap_model::columns;

use super::{
    RowTerms, procedure_subject, stratifai_function, temporal_context_call, value_param,
};
use crate::block::{RuleBlock, iri, placeholder};

/// Observation-result statement for a measured field.
///
/// Non-Boolean fields also link to their primitive value.
pub fn observation_result_statement(terms: &RowTerms<'_>, source: &str) -> RuleBlock {
    let RowTerms {
        ontology_mapping,
        field_id,
        ..
    } = *terms;
    let case_id = placeholder(columns::CASE_ID);
    let block = RuleBlock::new(
        format!("{ontology_mapping}_{field_id}_ObservationResultStatement"),
        source,
        format!("base:ObservationResultSt_{ontology_mapping}_{field_id}_{case_id}"),
    )
    .pair("a", iri(format_args!("stratifai:{ontology_mapping}")))
    .pair("scdm:hasObservable", iri(terms.observable))
    .pair(
        "scdm:isResultOf",
        iri(procedure_subject(terms.source_procedure)),
    )
    .function("scdm:temporalContext", temporal_context_call())
    .function(
        "scdm:situationContext",
        stratifai_function("add_observable_statement_context")
            .param(value_param(0), placeholder(columns::VALUE_TYPE))
            .param(value_param(1), placeholder(columns::FIELD_VALUE)),
    );
    if terms.value_type.is_boolean() {
        block
    } else {
        block.pair(
            "scdm:hasObservableValue",
            iri(format_args!("base:PrimitiveValue_{field_id}_{case_id}")),
        )
    }
}

/// Primitive value node carrying the literal field value.
pub fn primitive_value(terms: &RowTerms<'_>, source: &str) -> RuleBlock {
    let RowTerms {
        ontology_mapping,
        field_id,
        ..
    } = *terms;
    RuleBlock::new(
        format!("{ontology_mapping}_{field_id}_PrimitiveValue"),
        source,
        format!(
            "base:PrimitiveValue_{field_id}_{}",
            placeholder(columns::CASE_ID)
        ),
    )
    .pair("a", iri("scdm:QuantitativeResultValue"))
    .literal(
        "btl2:hasValue",
        placeholder(columns::FIELD_VALUE),
        terms.value_type.xsd_datatype(),
    )
}
