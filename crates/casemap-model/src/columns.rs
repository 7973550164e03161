//! Column names shared by the data, mapping and normalized tables.

/// Case identifier column of the data table.
pub const CASE_ID: &str = "case_id";

pub const FIELD_ID: &str = "field_id";
pub const VALUE_TYPE: &str = "value_type";
pub const CATEGORICAL_VALUE: &str = "categorical_value";
pub const CATEGORICAL_ONTOLOGY_MAPPING: &str = "categorical_ontology_mapping";
pub const PROCEDURE_RESULT: &str = "procedure_result";
pub const ONTOLOGY_MAPPING: &str = "ontology_mapping";
pub const PATTERN_TYPE: &str = "pattern_type";
pub const OBSERVABLE: &str = "observable";
pub const SOURCE_PROCEDURE: &str = "source_procedure";
pub const PROCEDURE: &str = "procedure";
pub const PROCEDURE_REASON: &str = "procedure_reason";
pub const PROCEDURE_LOCATION: &str = "procedure_location";

// Optional mapping columns, carried as extras and referenced by rule blocks.
pub const TEMPORAL_CONTEXT: &str = "temporal_context";
pub const STATEMENT_CONTEXT: &str = "statement_context";
pub const FINDING: &str = "finding";

/// Resolved value column appended to normalized rows.
pub const FIELD_VALUE: &str = "field_value";

/// Columns every data table must expose.
pub const REQUIRED_DATA_COLUMNS: &[&str] = &[CASE_ID];

/// Columns every mapping table must expose.
pub const REQUIRED_MAPPING_COLUMNS: &[&str] = &[
    FIELD_ID,
    VALUE_TYPE,
    CATEGORICAL_VALUE,
    CATEGORICAL_ONTOLOGY_MAPPING,
    PROCEDURE_RESULT,
];
