use std::collections::BTreeMap;

use crate::columns;

/// One case record of the data table, keyed by field identifier.
///
/// Every column of the table has an entry, empty cells included, so column
/// presence and value presence can be told apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseRecord {
    pub cells: BTreeMap<String, String>,
}

impl CaseRecord {
    pub fn new(cells: BTreeMap<String, String>) -> Self {
        Self { cells }
    }

    /// Raw value of `field`, `None` when the column is missing or the cell empty.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cells
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// True when the record has a column named `field`, whatever its value.
    pub fn has_column(&self, field: &str) -> bool {
        self.cells.contains_key(field)
    }

    /// Case identifier, empty when absent.
    pub fn case_id(&self) -> &str {
        self.get(columns::CASE_ID).unwrap_or("")
    }
}

/// The data table: header plus one record per case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub records: Vec<CaseRecord>,
}

impl DataTable {
    pub fn new(columns: Vec<String>, records: Vec<CaseRecord>) -> Self {
        Self { columns, records }
    }

    /// Build a table from a header and raw rows; short rows are padded with
    /// empty cells.
    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Self {
        let records = rows
            .iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| (column.clone(), row.get(idx).cloned().unwrap_or_default()))
                    .collect();
                CaseRecord { cells }
            })
            .collect();
        Self { columns, records }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
