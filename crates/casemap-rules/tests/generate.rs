use casemap_model::{FieldValue, MappingDefinition, NormalizedRow, PatternType, ValueType};
use casemap_rules::{Diagnostic, generate_document, render_header, render_row};

const SOURCE: &str = "csv/field.csv";

fn row(field: &str, value_type: ValueType, pattern: &str, value: FieldValue) -> NormalizedRow {
    NormalizedRow {
        definition: MappingDefinition {
            field_id: field.to_string(),
            value_type,
            ontology_mapping: "BodyWeight".to_string(),
            pattern_type: PatternType::parse(pattern),
            observable: "sct:27113001".to_string(),
            source_procedure: "http://snomed.info/id/39857003".to_string(),
            ..MappingDefinition::default()
        },
        case_id: "1".to_string(),
        field_value: value,
        procedure_result: None,
    }
}

fn block_names(row: &NormalizedRow) -> Vec<String> {
    render_row(row, SOURCE)
        .expect("known pattern")
        .iter()
        .map(|block| block.name().to_string())
        .collect()
}

#[test]
fn observation_pattern_renders_three_blocks_in_order() {
    let weight = row(
        "weight",
        ValueType::Integer,
        "ObservationResultStatement",
        FieldValue::Integer(70),
    );
    assert_eq!(
        block_names(&weight),
        vec![
            "BodyWeight_weight_ObservationResultStatement",
            "BodyWeight_ResultOfProcedure",
            "BodyWeight_weight_PrimitiveValue",
        ]
    );

    let document = generate_document(&[weight], SOURCE);
    assert_eq!(document.block_count, 3);
    assert!(document.diagnostics.is_empty());
    let text = &document.text;
    assert!(text.contains("    s: base:ObservationResultSt_BodyWeight_weight_$(case_id)\n"));
    assert!(text.contains("      - [scdm:hasObservable, sct:27113001~iri]\n"));
    assert!(text.contains("      - [scdm:isResultOf, base:Procedure_39857003_$(case_id)~iri]\n"));
    assert!(text.contains(
        "      - [scdm:hasObservableValue, base:PrimitiveValue_weight_$(case_id)~iri]\n"
    ));
    assert!(text.contains("      - [a, http://snomed.info/id/39857003~iri]\n"));
    assert!(text.contains("      - [btl2:hasValue, $(field_value), xsd:integer]\n"));
}

#[test]
fn boolean_observation_has_no_observable_value() {
    let smoker = row(
        "smoker",
        ValueType::Boolean,
        "ObservationResultStatement",
        FieldValue::Text("True".to_string()),
    );
    let document = generate_document(&[smoker], SOURCE);
    assert!(!document.text.contains("scdm:hasObservableValue"));
    assert!(document.text.contains("xsd:boolean]"));
}

#[test]
fn empty_source_procedure_skips_the_procedure_reference() {
    let mut weight = row(
        "weight",
        ValueType::Float,
        "ObservationResultStatement",
        FieldValue::Text("70.5".to_string()),
    );
    weight.definition.source_procedure = "  ".to_string();
    assert_eq!(
        block_names(&weight),
        vec![
            "BodyWeight_weight_ObservationResultStatement",
            "BodyWeight_weight_PrimitiveValue",
        ]
    );
}

#[test]
fn only_the_first_row_of_a_field_is_rendered() {
    let first = row(
        "age",
        ValueType::Integer,
        "ObservationResultStatement",
        FieldValue::Integer(50),
    );
    let mut second = first.clone();
    second.definition.ontology_mapping = "AgeAtDiagnosis".to_string();
    second.case_id = "2".to_string();

    let single = generate_document(std::slice::from_ref(&first), SOURCE);
    let twice = generate_document(&[first, second], SOURCE);
    assert_eq!(twice.text, single.text);
    assert!(!twice.text.contains("AgeAtDiagnosis"));
}

#[test]
fn unknown_pattern_is_reported_and_later_fields_still_render() {
    let unknown = row("mood", ValueType::String, "Foo", FieldValue::Empty);
    let weight = row(
        "weight",
        ValueType::Integer,
        "ObservationResultStatement",
        FieldValue::Integer(70),
    );
    let document = generate_document(&[unknown, weight], SOURCE);
    assert_eq!(
        document.diagnostics,
        vec![Diagnostic::UnknownPatternType {
            field_id: "mood".to_string(),
            label: "Foo".to_string(),
        }]
    );
    assert!(!document.text.contains("mood"));
    assert!(document.text.contains("BodyWeight_weight_PrimitiveValue:"));
    insta::assert_snapshot!(
        document.diagnostics[0].to_string(),
        @"unknown or unhandled pattern type 'Foo' for field 'mood'"
    );
}

#[test]
fn generation_is_deterministic() {
    let rows = vec![
        row(
            "weight",
            ValueType::Integer,
            "ObservationResultStatement",
            FieldValue::Integer(70),
        ),
        row(
            "stage",
            ValueType::Categorical,
            "ClinicalSituationStatement",
            FieldValue::Text("II".to_string()),
        ),
    ];
    assert_eq!(
        generate_document(&rows, SOURCE),
        generate_document(&rows, SOURCE)
    );
}

#[test]
fn document_without_rows_is_the_header() {
    let document = generate_document(&[], SOURCE);
    assert_eq!(document.text, render_header(SOURCE));
    assert_eq!(document.block_count, 0);
}

#[test]
fn blocks_are_separated_by_one_blank_line() {
    let weight = row(
        "weight",
        ValueType::Integer,
        "ObservationResultStatement",
        FieldValue::Integer(70),
    );
    let text = generate_document(&[weight], SOURCE).text;
    assert!(!text.contains("\n\n\n"));
    assert!(text.contains("_$(case_id)~iri]\n\n  BodyWeight_ResultOfProcedure:\n"));
    assert!(text.ends_with("xsd:integer]\n"));
}

#[test]
fn situation_represents_categorical_term_and_procedure_result() {
    let mut stage = row(
        "stage",
        ValueType::Categorical,
        "ClinicalSituationStatement",
        FieldValue::Text("II".to_string()),
    );
    stage.definition.categorical_ontology_mapping = Some("sct:StageII".to_string());
    stage.procedure_result = Some("http://snomed.info/id/86273004".to_string());

    let text = generate_document(&[stage.clone()], SOURCE).text;
    assert!(text.contains("  BodyWeight_ClinicalSituationStatement:\n"));
    assert!(text.contains(
        "    s: base:ClinicalSituationSt_$(ontology_mapping)_$(field_id)_$(case_id)\n"
    ));
    assert!(text.contains(
        "      - [scdm:representsSituation, $(categorical_ontology_mapping)~iri]\n"
    ));
    assert!(text.contains(
        "          - function: stratifai-function:extract_last_part\n\
         \x20           parameters:\n\
         \x20             - parameter: grel:valueParam\n\
         \x20               value: $(procedure_result)\n"
    ));

    stage.definition.categorical_ontology_mapping = None;
    stage.procedure_result = None;
    let text = generate_document(&[stage], SOURCE).text;
    assert!(text.contains("      - [scdm:representsSituation, $(finding)~iri]\n"));
    assert!(!text.contains("$(procedure_result)"));
}

#[test]
fn procedure_pattern_renders_represented_procedure_when_applicable() {
    let mut biopsy = row(
        "biopsy",
        ValueType::Boolean,
        "ClinicalProcedureStatement",
        FieldValue::Text("True".to_string()),
    );
    biopsy.definition.procedure = "http://snomed.info/id/86273004".to_string();
    assert_eq!(
        block_names(&biopsy),
        vec![
            "BodyWeight_biopsy_ClinicalProcedureStatement",
            "BodyWeight_RepresentedProcedure",
            "BodyWeight_ResultOfProcedure",
        ]
    );
    let text = generate_document(&[biopsy.clone()], SOURCE).text;
    assert!(text.contains(
        "      - p: scdm:representsProcedure\n\
         \x20       o:\n\
         \x20         - function: stratifai-function:extract_last_part\n\
         \x20           parameters:\n\
         \x20             - parameter: grel:valueParam\n\
         \x20               value: $(procedure)\n"
    ));
    assert!(text.contains("    s:\n      - function: stratifai-function:generateDynamicSubject\n"));
    assert!(text.contains("            value: $(case_id)\n        type: iri\n    po:\n"));

    biopsy.definition.procedure = "dateTime".to_string();
    assert_eq!(
        block_names(&biopsy),
        vec![
            "BodyWeight_biopsy_ClinicalProcedureStatement",
            "BodyWeight_ResultOfProcedure",
        ]
    );
}

#[test]
fn procedure_aspects_do_not_represent_a_procedure() {
    let mut reason = row(
        "reason",
        ValueType::Categorical,
        "ClinicalProcedureStatement",
        FieldValue::Text("Screening".to_string()),
    );
    reason.definition.procedure = "procedureReason".to_string();
    reason.definition.categorical_ontology_mapping = Some("sct:Screening".to_string());
    let text = generate_document(std::slice::from_ref(&reason), SOURCE).text;
    assert!(!text.contains("scdm:representsProcedure"));
    assert!(text.contains("  BodyWeight_RepresentedProcedure:\n"));

    reason.definition.procedure = "http://snomed.info/id/387713003".to_string();
    let text = generate_document(&[reason], SOURCE).text;
    assert!(text.contains("value: $(categorical_ontology_mapping)\n              - parameter: grel:valueParam1\n"));
}

#[test]
fn yes_no_values_represent_the_procedure() {
    let mut done = row(
        "surgery",
        ValueType::Categorical,
        "ClinicalProcedureStatement",
        FieldValue::Text("yes".to_string()),
    );
    done.definition.procedure = "sct:387713003".to_string();
    let text = generate_document(&[done], SOURCE).text;
    assert!(text.contains("- p: scdm:representsProcedure\n"));
    assert!(!text.contains("RepresentedProcedure:"));
}
