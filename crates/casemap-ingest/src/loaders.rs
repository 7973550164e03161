//! Typed loaders for the three tables of the pipeline.

use std::path::Path;

use casemap_model::{DataTable, MappingTable, NormalizedTable};

use crate::csv_table::{read_csv_table, write_csv_table};
use crate::error::Result;

/// Load the case data table.
pub fn load_data_table(path: &Path) -> Result<DataTable> {
    let table = read_csv_table(path)?;
    Ok(DataTable::from_rows(table.headers, &table.rows))
}

/// Load the mapping table as written on disk.
///
/// Cells are not trimmed here; run [`crate::trim_mapping_table`] before
/// indexing.
pub fn load_mapping_table(path: &Path) -> Result<MappingTable> {
    let table = read_csv_table(path)?;
    Ok(MappingTable::from_rows(table.headers, &table.rows))
}

/// Load a persisted normalized intermediate table.
pub fn load_normalized_table(path: &Path) -> Result<NormalizedTable> {
    let table = read_csv_table(path)?;
    Ok(NormalizedTable::from_rows(table.headers, &table.rows))
}

/// Persist a normalized table, header row included even when it has no rows.
pub fn write_normalized_table(path: &Path, table: &NormalizedTable) -> Result<()> {
    write_csv_table(path, &table.columns, table.records())?;
    tracing::debug!(
        path = %path.display(),
        row_count = table.len(),
        "wrote normalized table"
    );
    Ok(())
}
