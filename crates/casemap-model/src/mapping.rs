use std::collections::BTreeMap;

use serde::Serialize;

use crate::columns;
use crate::enums::{PatternType, ValueType};

/// One row of the mapping table.
///
/// Optional cells are `None` when the source cell was empty. Columns without a
/// typed slot are kept in `extra` so they survive into the normalized table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingDefinition {
    pub field_id: String,
    pub value_type: ValueType,
    /// Literal expected in the data table for this definition to apply.
    pub categorical_value: Option<String>,
    /// Ontology term the categorical value resolves to.
    pub categorical_ontology_mapping: Option<String>,
    /// Field whose value is looked up through that field's categorical index.
    pub procedure_result: Option<String>,
    pub ontology_mapping: String,
    pub pattern_type: PatternType,
    pub observable: String,
    pub source_procedure: String,
    pub procedure: String,
    pub procedure_reason: String,
    pub procedure_location: String,
    pub extra: BTreeMap<String, String>,
}

impl Default for MappingDefinition {
    fn default() -> Self {
        Self {
            field_id: String::new(),
            value_type: ValueType::Other(String::new()),
            categorical_value: None,
            categorical_ontology_mapping: None,
            procedure_result: None,
            ontology_mapping: String::new(),
            pattern_type: PatternType::Unrecognized(String::new()),
            observable: String::new(),
            source_procedure: String::new(),
            procedure: String::new(),
            procedure_reason: String::new(),
            procedure_location: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl MappingDefinition {
    /// Build a definition from `(column, cell)` pairs of one table row.
    ///
    /// Cell text is kept verbatim; trimming is a separate pre-step.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut definition = Self::default();
        for (column, value) in cells {
            match column {
                columns::FIELD_ID => definition.field_id = value.to_string(),
                columns::VALUE_TYPE => definition.value_type = ValueType::parse(value),
                columns::CATEGORICAL_VALUE => definition.categorical_value = non_empty(value),
                columns::CATEGORICAL_ONTOLOGY_MAPPING => {
                    definition.categorical_ontology_mapping = non_empty(value)
                }
                columns::PROCEDURE_RESULT => definition.procedure_result = non_empty(value),
                columns::ONTOLOGY_MAPPING => definition.ontology_mapping = value.to_string(),
                columns::PATTERN_TYPE => definition.pattern_type = PatternType::parse(value),
                columns::OBSERVABLE => definition.observable = value.to_string(),
                columns::SOURCE_PROCEDURE => definition.source_procedure = value.to_string(),
                columns::PROCEDURE => definition.procedure = value.to_string(),
                columns::PROCEDURE_REASON => definition.procedure_reason = value.to_string(),
                columns::PROCEDURE_LOCATION => definition.procedure_location = value.to_string(),
                _ => {
                    definition
                        .extra
                        .insert(column.to_string(), value.to_string());
                }
            }
        }
        definition
    }

    /// Cell text for `column`, empty when the column is unknown or absent.
    pub fn cell(&self, column: &str) -> String {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        match column {
            columns::FIELD_ID => self.field_id.clone(),
            columns::VALUE_TYPE => self.value_type.as_str().to_string(),
            columns::CATEGORICAL_VALUE => optional(&self.categorical_value),
            columns::CATEGORICAL_ONTOLOGY_MAPPING => optional(&self.categorical_ontology_mapping),
            columns::PROCEDURE_RESULT => optional(&self.procedure_result),
            columns::ONTOLOGY_MAPPING => self.ontology_mapping.clone(),
            columns::PATTERN_TYPE => self.pattern_type.as_str().to_string(),
            columns::OBSERVABLE => self.observable.clone(),
            columns::SOURCE_PROCEDURE => self.source_procedure.clone(),
            columns::PROCEDURE => self.procedure.clone(),
            columns::PROCEDURE_REASON => self.procedure_reason.clone(),
            columns::PROCEDURE_LOCATION => self.procedure_location.clone(),
            other => self.extra.get(other).cloned().unwrap_or_default(),
        }
    }
}

/// The mapping table: header plus typed definitions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    pub columns: Vec<String>,
    pub definitions: Vec<MappingDefinition>,
}

impl MappingTable {
    pub fn new(columns: Vec<String>, definitions: Vec<MappingDefinition>) -> Self {
        Self {
            columns,
            definitions,
        }
    }

    /// Build a table from a header and raw rows; short rows are padded with
    /// empty cells.
    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Self {
        let definitions = rows
            .iter()
            .map(|row| {
                MappingDefinition::from_cells(columns.iter().enumerate().map(|(idx, column)| {
                    (
                        column.as_str(),
                        row.get(idx).map(String::as_str).unwrap_or(""),
                    )
                }))
            })
            .collect();
        Self {
            columns,
            definitions,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_types_known_columns_and_keeps_extras() {
        let columns: Vec<String> = [
            "field_id",
            "value_type",
            "categorical_value",
            "pattern_type",
            "temporal_context",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let rows = vec![vec![
            "smoker".to_string(),
            "Categorical".to_string(),
            "".to_string(),
            "ClinicalSituationStatement".to_string(),
            "http://snomed.info/id/410512000".to_string(),
        ]];
        let table = MappingTable::from_rows(columns, &rows);
        let definition = &table.definitions[0];
        assert_eq!(definition.field_id, "smoker");
        assert_eq!(definition.value_type, ValueType::Categorical);
        assert_eq!(definition.categorical_value, None);
        assert_eq!(
            definition.pattern_type,
            PatternType::ClinicalSituationStatement
        );
        assert_eq!(
            definition.cell("temporal_context"),
            "http://snomed.info/id/410512000"
        );
        assert_eq!(definition.cell("observable"), "");
    }

    #[test]
    fn short_rows_are_padded() {
        let columns = vec!["field_id".to_string(), "categorical_value".to_string()];
        let table = MappingTable::from_rows(columns, &[vec!["bp".to_string()]]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.definitions[0].categorical_value, None);
        assert!(table.has_column("categorical_value"));
    }
}
