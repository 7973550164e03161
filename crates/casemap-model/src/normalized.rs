//! Normalized rows produced by preprocessing and consumed by rule generation.

use std::fmt;

use serde::Serialize;

use crate::columns;
use crate::enums::ValueType;
use crate::mapping::{MappingDefinition, MappingTable};

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    /// The data cell was empty and the value type passes values through.
    Empty,
}

impl FieldValue {
    /// Re-read a persisted value according to the definition's value type.
    pub fn from_text(value_type: &ValueType, text: &str) -> Self {
        if text.is_empty() {
            return FieldValue::Empty;
        }
        if matches!(value_type, ValueType::Integer) {
            if let Ok(number) = text.trim().parse::<i64>() {
                return FieldValue::Integer(number);
            }
        }
        FieldValue::Text(text.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(number) => write!(f, "{number}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// A matched mapping definition extended with the values resolved for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    pub definition: MappingDefinition,
    pub case_id: String,
    pub field_value: FieldValue,
    /// Ontology term resolved through the referenced field, if any.
    pub procedure_result: Option<String>,
}

impl NormalizedRow {
    /// Cell text for `column` in the persisted intermediate table.
    pub fn cell(&self, column: &str) -> String {
        match column {
            columns::CASE_ID => self.case_id.clone(),
            columns::FIELD_VALUE => self.field_value.to_string(),
            columns::PROCEDURE_RESULT => self.procedure_result.clone().unwrap_or_default(),
            other => self.definition.cell(other),
        }
    }

    /// Rebuild a row from `(column, cell)` pairs of the intermediate table.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut case_id = String::new();
        let mut field_value = "";
        let mut mapping_cells = Vec::new();
        for (column, value) in cells {
            match column {
                columns::CASE_ID => case_id = value.to_string(),
                columns::FIELD_VALUE => field_value = value,
                _ => mapping_cells.push((column, value)),
            }
        }
        let definition = MappingDefinition::from_cells(mapping_cells);
        let field_value = FieldValue::from_text(&definition.value_type, field_value);
        let procedure_result = definition.procedure_result.clone();
        Self {
            definition,
            case_id,
            field_value,
            procedure_result,
        }
    }
}

/// The normalized intermediate table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    /// Empty table whose header extends the mapping table's header with the
    /// case identifier and resolved value columns.
    pub fn for_mapping(mapping: &MappingTable) -> Self {
        let mut columns = mapping.columns.clone();
        for extra in [columns::CASE_ID, columns::FIELD_VALUE] {
            if !columns.iter().any(|column| column == extra) {
                columns.push(extra.to_string());
            }
        }
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                NormalizedRow::from_cells(columns.iter().enumerate().map(|(idx, column)| {
                    (
                        column.as_str(),
                        row.get(idx).map(String::as_str).unwrap_or(""),
                    )
                }))
            })
            .collect();
        Self { columns, rows }
    }

    /// Cells of every row in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|column| row.cell(column)).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn header_appends_case_and_value_columns_once() {
        let mapping = MappingTable::new(strings(&["field_id", "field_value", "value_type"]), vec![]);
        let table = NormalizedTable::for_mapping(&mapping);
        assert_eq!(
            table.columns,
            strings(&["field_id", "field_value", "value_type", "case_id"])
        );
    }

    #[test]
    fn procedure_result_cell_is_the_resolved_term() {
        let row = NormalizedRow {
            definition: MappingDefinition {
                field_id: "stage".to_string(),
                procedure_result: Some("biopsy".to_string()),
                ..MappingDefinition::default()
            },
            case_id: "3".to_string(),
            field_value: FieldValue::Text("II".to_string()),
            procedure_result: None,
        };
        assert_eq!(row.cell("procedure_result"), "");
        assert_eq!(row.cell("field_value"), "II");
        assert_eq!(row.cell("case_id"), "3");
    }

    #[test]
    fn rows_read_back_with_typed_values() {
        let columns = strings(&["field_id", "value_type", "case_id", "field_value"]);
        let table = NormalizedTable::from_rows(
            columns,
            &[strings(&["weight", "Integer", "1", "70"]), strings(&["note", "String", "2", ""])],
        );
        assert_eq!(table.rows[0].field_value, FieldValue::Integer(70));
        assert_eq!(table.rows[1].field_value, FieldValue::Empty);
        let records: Vec<Vec<String>> = table.records().collect();
        assert_eq!(records[0], strings(&["weight", "Integer", "1", "70"]));
    }
}
