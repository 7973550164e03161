//! Row expansion: case records times candidate definitions.

use std::time::Instant;

use casemap_model::{
    CaseRecord, DataTable, MappingDefinition, MappingTable, NormalizedRow, NormalizedTable,
    SchemaError,
};
use tracing::{debug, info, info_span};

use crate::index::{FieldIndex, ProcedureResultIndex, build_mapping_indices};
use crate::resolve::{resolve_procedure_result, resolve_value};
use crate::schema::validate_inputs;

/// True when `definition` applies to a record whose raw value is `raw`.
///
/// A definition without a categorical value always applies; otherwise the raw
/// value must equal it exactly.
pub fn matches_candidate(definition: &MappingDefinition, raw: Option<&str>) -> bool {
    match definition.categorical_value.as_deref() {
        None => true,
        Some(expected) => raw == Some(expected),
    }
}

fn expand_record(
    record: &CaseRecord,
    fields: &FieldIndex,
    procedures: &ProcedureResultIndex,
    out: &mut Vec<NormalizedRow>,
) {
    for (field, candidates) in fields.iter() {
        let raw = record.get(field);
        for definition in candidates {
            if !matches_candidate(definition, raw) {
                continue;
            }
            let Some(field_value) = resolve_value(record, definition) else {
                continue;
            };
            out.push(NormalizedRow {
                definition: definition.clone(),
                case_id: record.case_id().to_string(),
                field_value,
                procedure_result: resolve_procedure_result(record, definition, procedures),
            });
        }
    }
}

/// Expand every record against the field index.
///
/// Output follows record order, then field order, then candidate order.
pub fn expand_rows(
    data: &DataTable,
    fields: &FieldIndex,
    procedures: &ProcedureResultIndex,
) -> Vec<NormalizedRow> {
    let mut rows = Vec::new();
    for record in &data.records {
        expand_record(record, fields, procedures, &mut rows);
    }
    rows
}

/// Validate, index and expand one pair of tables.
///
/// Only definitions whose field exists as a data column are indexed. The
/// mapping table is expected to be trimmed already.
pub fn process_data(data: &DataTable, mapping: &MappingTable) -> Result<NormalizedTable, SchemaError> {
    let span = info_span!("preprocess", cases = data.len(), definitions = mapping.len());
    let _guard = span.enter();
    let start = Instant::now();

    validate_inputs(data, mapping)?;

    let present = mapping
        .definitions
        .iter()
        .filter(|definition| data.has_column(&definition.field_id));
    let (fields, procedures) = build_mapping_indices(present);
    debug!(mapped_fields = fields.len(), "indexed definitions present in data");

    let mut table = NormalizedTable::for_mapping(mapping);
    table.rows = expand_rows(data, &fields, &procedures);

    info!(
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "preprocessing complete"
    );
    Ok(table)
}
