use std::fs;
use std::path::PathBuf;

use casemap_ingest::{
    IngestError, export_group, group_by_field, load_data_table, load_mapping_table,
    load_normalized_table, read_csv_table, trim_mapping_table, write_normalized_table,
};
use casemap_model::{FieldValue, PatternType, ValueType};

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_data_table_with_bom_and_keeps_cells_verbatim() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(
        &dir,
        "data.csv",
        "\u{feff}case_id,bp,weight\n1, High,70\n2,Low,\n",
    );
    let table = load_data_table(&path).expect("load data");
    assert_eq!(table.columns, vec!["case_id", "bp", "weight"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.records[0].get("bp"), Some(" High"));
    assert_eq!(table.records[1].get("weight"), None);
    assert!(table.records[1].has_column("weight"));
}

#[test]
fn loads_and_trims_mapping_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(
        &dir,
        "mapping.csv",
        "field_id,value_type,categorical_value,categorical_ontology_mapping,procedure_result,pattern_type,temporal_context\n\
         bp ,Categorical, High ,sct:High,,ObservationResultStatement,sct:Current\n",
    );
    let table = trim_mapping_table(load_mapping_table(&path).expect("load mapping"));
    let definition = &table.definitions[0];
    assert_eq!(definition.field_id, "bp");
    assert_eq!(definition.value_type, ValueType::Categorical);
    assert_eq!(definition.categorical_value.as_deref(), Some("High"));
    assert_eq!(
        definition.categorical_ontology_mapping.as_deref(),
        Some("sct:High")
    );
    assert_eq!(definition.procedure_result, None);
    assert_eq!(
        definition.pattern_type,
        PatternType::ObservationResultStatement
    );
    assert_eq!(definition.cell("temporal_context"), "sct:Current");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(&dir, "empty.csv", "");
    let err = read_csv_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn normalized_table_survives_a_round_trip_and_groups_by_field() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = temp_file(
        &dir,
        "preprocessed.csv",
        "field_id,value_type,pattern_type,procedure_result,case_id,field_value\n\
         weight,Integer,ObservationResultStatement,,1,70\n\
         smoker,Boolean,,,1,True\n\
         weight,Integer,ObservationResultStatement,,2,82\n",
    );
    let table = load_normalized_table(&source).expect("load normalized");
    assert_eq!(table.rows[0].field_value, FieldValue::Integer(70));

    let copy = dir.path().join("copy.csv");
    write_normalized_table(&copy, &table).expect("write normalized");
    assert_eq!(
        fs::read_to_string(&copy).expect("read copy"),
        fs::read_to_string(&source).expect("read source")
    );

    let groups = group_by_field(&table);
    let fields: Vec<&str> = groups.iter().map(|g| g.field_id.as_str()).collect();
    assert_eq!(fields, vec!["weight", "smoker"]);
    assert_eq!(groups[0].rows.len(), 2);
    assert!(!groups[0].has_blank_pattern());
    assert!(groups[1].has_blank_pattern());

    let exported = export_group(dir.path(), "weight", &table.columns, &groups[0]).expect("export");
    assert_eq!(exported, dir.path().join("weight.csv"));
    let exported = read_csv_table(&exported).expect("read export");
    assert_eq!(exported.rows.len(), 2);
    assert_eq!(exported.rows[1][5], "82");
}
