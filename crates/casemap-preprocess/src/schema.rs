use std::collections::BTreeSet;

use casemap_model::columns::{REQUIRED_DATA_COLUMNS, REQUIRED_MAPPING_COLUMNS};
use casemap_model::{DataTable, MappingTable, SchemaError, TableKind};

fn missing_columns(required: &[&str], actual: &[String]) -> BTreeSet<String> {
    required
        .iter()
        .filter(|column| !actual.iter().any(|name| name == *column))
        .map(|column| (*column).to_string())
        .collect()
}

/// Check that both tables expose their required columns.
///
/// The data table is checked first; the error names every missing column of
/// the first table that fails.
pub fn validate_inputs(data: &DataTable, mapping: &MappingTable) -> Result<(), SchemaError> {
    for (table, required, actual) in [
        (TableKind::Data, REQUIRED_DATA_COLUMNS, &data.columns),
        (TableKind::Mapping, REQUIRED_MAPPING_COLUMNS, &mapping.columns),
    ] {
        let missing = missing_columns(required, actual);
        if !missing.is_empty() {
            return Err(SchemaError { table, missing });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn mapping_with(columns: &[&str]) -> MappingTable {
        MappingTable::new(strings(columns), vec![])
    }

    #[test]
    fn accepts_complete_tables() {
        let data = DataTable::new(strings(&["case_id", "weight"]), vec![]);
        let mapping = mapping_with(REQUIRED_MAPPING_COLUMNS);
        assert_eq!(validate_inputs(&data, &mapping), Ok(()));
    }

    #[test]
    fn names_missing_data_columns() {
        let data = DataTable::new(strings(&["id"]), vec![]);
        let err = validate_inputs(&data, &mapping_with(&[])).unwrap_err();
        assert_eq!(err.table, TableKind::Data);
        assert_eq!(err.missing, ["case_id".to_string()].into_iter().collect());
    }

    #[test]
    fn names_exactly_the_missing_mapping_columns() {
        let data = DataTable::new(strings(&["case_id"]), vec![]);
        let mapping = mapping_with(&["field_id", "value_type", "procedure_result", "observable"]);
        let err = validate_inputs(&data, &mapping).unwrap_err();
        assert_eq!(err.table, TableKind::Mapping);
        let missing: Vec<&str> = err.missing.iter().map(String::as_str).collect();
        assert_eq!(
            missing,
            vec!["categorical_ontology_mapping", "categorical_value"]
        );
    }
}
