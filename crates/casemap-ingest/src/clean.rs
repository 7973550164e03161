//! Whitespace clean-up applied to a mapping table before indexing.

use casemap_model::{MappingDefinition, MappingTable};

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn trim_definition(definition: &mut MappingDefinition) {
    definition.field_id = definition.field_id.trim().to_string();
    definition.categorical_value = trim_optional(definition.categorical_value.take());
    definition.procedure_result = trim_optional(definition.procedure_result.take());
}

/// Trim `field_id`, `categorical_value` and `procedure_result` on every
/// definition. Optional values that trim to nothing become absent.
///
/// This is an explicit pre-step: indexing and row expansion compare values
/// exactly and never trim on their own.
pub fn trim_mapping_table(mut table: MappingTable) -> MappingTable {
    for definition in &mut table.definitions {
        trim_definition(definition);
    }
    table
}
