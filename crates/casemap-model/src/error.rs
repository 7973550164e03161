use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which input table a schema check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableKind {
    Data,
    Mapping,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Data => "data",
            TableKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required columns absent from an input table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the following columns are missing in the {table} table: {}", join_columns(.missing))]
pub struct SchemaError {
    pub table: TableKind,
    pub missing: BTreeSet<String>,
}

fn join_columns(columns: &BTreeSet<String>) -> String {
    columns
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError {
            table: TableKind::Mapping,
            missing: ["value_type", "field_id"]
                .into_iter()
                .map(String::from)
                .collect(),
        };
        assert_eq!(
            err.to_string(),
            "the following columns are missing in the mapping table: field_id, value_type"
        );
    }
}
