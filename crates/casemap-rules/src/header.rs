//! Static document preamble: prefixes and field-independent mapping blocks.

use std::fmt;

use casemap_model::columns;

use crate::block::{FunctionCall, RuleBlock, iri, placeholder};
use crate::templates::{stratifai_function, value_param};

/// Namespace prefixes declared by every generated document.
pub const PREFIXES: &[(&str, &str)] = &[
    ("base", "http://stratifai-resources/ontologies/stratifai-data#"),
    ("stratifai", "http://stratifai#"),
    ("sct", "http://snomed.info/id/"),
    (
        "scdm",
        "http://www.semanticweb.org/catimc/SemanticCommonDataModel#",
    ),
    ("btl2", "http://purl.org/biotop/btl2.owl#"),
    ("fno", "https://w3id.org/function/ontology#"),
    ("fnom", "https://w3id.org/function/vocabulary/mapping#"),
    ("ex", "http://example.org/functions#"),
    (
        "stratifai-function",
        "http://ontology.stratifai.um.es/STRATIF-AI_Functions/",
    ),
    ("grel", "http://users.ugent.be/bjdmeest/function/grel.ttl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

fn call(name: &str, arguments: &[&str]) -> FunctionCall {
    arguments
        .iter()
        .enumerate()
        .fold(stratifai_function(name), |call, (idx, column)| {
            call.param(value_param(idx), placeholder(column))
        })
}

/// Block typed by the value of a context column, with its subject built by
/// `function` from that same column.
fn context_block(name: &str, source: &str, function: &str, column: &str) -> RuleBlock {
    RuleBlock::with_subject_function(name, source, call(function, &[column]))
        .pair("a", iri(placeholder(column)))
}

fn static_blocks(source: &str) -> Vec<RuleBlock> {
    let case_id = placeholder(columns::CASE_ID);
    vec![
        RuleBlock::new("ClinicalCase", source, format!("base:Case_{case_id}"))
            .pair("a", "stratifai:ClinicalCase")
            .literal("stratifai:caseId", case_id.clone(), "xsd:string")
            .pair(
                "scdm:hasInformationAboutProvider",
                iri(format_args!(
                    "base:InformationAboutStratifAIProviderOfInformation_{case_id}"
                )),
            )
            .pair(
                "scdm:hasInformationAboutProvider",
                iri(format_args!(
                    "base:InformationAboutStratifAISourceOfInformation_{case_id}"
                )),
            )
            .function(
                "scdm:hasPart",
                call(
                    "generatePart",
                    &[
                        columns::PATTERN_TYPE,
                        columns::FIELD_ID,
                        columns::ONTOLOGY_MAPPING,
                        columns::CASE_ID,
                    ],
                ),
            ),
        RuleBlock::new(
            "InformationAboutProvider",
            source,
            format!("base:InformationAboutStratifAIProviderOfInformation_{case_id}"),
        )
        .pair("a", "stratifai:InformationAboutStratifAIProviderOfInformation")
        .pair(
            "btl2:represents",
            iri(format_args!("base:StratifAIProvider_{case_id}")),
        ),
        RuleBlock::new(
            "InformationAboutSource",
            source,
            format!("base:InformationAboutStratifAISourceOfInformation_{case_id}"),
        )
        .pair("a", "stratifai:InformationAboutStratifAISourceOfInformation")
        .pair(
            "btl2:represents",
            iri(format_args!("base:StratifAISource_{case_id}")),
        ),
        RuleBlock::new(
            "StratifAIProvider",
            source,
            format!("base:StratifAIProvider_{case_id}"),
        )
        .pair("a", "stratifai:StratifAIProvider"),
        RuleBlock::new(
            "StratifAISource",
            source,
            format!("base:StratifAISource_{case_id}"),
        )
        .pair("a", "stratifai:StratifAISource"),
        context_block(
            "StatementTemporalContext",
            source,
            "generate_temporal_context",
            columns::TEMPORAL_CONTEXT,
        ),
        context_block(
            "StatementContext",
            source,
            "generate_statement_context",
            columns::STATEMENT_CONTEXT,
        ),
        context_block(
            "ProcedureLocation",
            source,
            "generate_procedure_location",
            columns::PROCEDURE_LOCATION,
        ),
        context_block(
            "ProcedureReason",
            source,
            "generate_procedure_reason",
            columns::PROCEDURE_REASON,
        ),
        RuleBlock::with_subject_function(
            "ProcedureDateTime",
            source,
            call(
                "generate_procedure_dateTime",
                &[columns::PROCEDURE, columns::CATEGORICAL_ONTOLOGY_MAPPING],
            ),
        )
        .pair(
            "a",
            iri(placeholder(columns::CATEGORICAL_ONTOLOGY_MAPPING)),
        ),
    ]
}

/// Document preamble bound to one source table.
struct Header<'a> {
    source: &'a str,
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "prefixes:")?;
        for (prefix, namespace) in PREFIXES {
            writeln!(f, "  {prefix}: {namespace}")?;
        }
        writeln!(f)?;
        writeln!(f, "mappings:")?;
        writeln!(f)?;
        for block in static_blocks(self.source) {
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Render the preamble for a document whose blocks read from `source`.
///
/// Every block is followed by a blank line, so field blocks can be appended
/// directly.
pub fn render_header(source: &str) -> String {
    Header { source }.to_string()
}
