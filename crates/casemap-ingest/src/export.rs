//! Per-field export of the normalized table.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use casemap_model::{NormalizedRow, NormalizedTable};

use crate::csv_table::write_csv_table;
use crate::error::Result;

/// Rows of the normalized table sharing one field identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub field_id: String,
    pub rows: Vec<NormalizedRow>,
}

impl FieldGroup {
    /// True when any row of the group has no pattern type; such groups cannot
    /// produce rules.
    pub fn has_blank_pattern(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.definition.pattern_type.is_blank())
    }
}

/// Group rows by field identifier, groups in first-seen order.
pub fn group_by_field(table: &NormalizedTable) -> Vec<FieldGroup> {
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut groups: Vec<FieldGroup> = Vec::new();
    for row in &table.rows {
        let field_id = row.definition.field_id.as_str();
        match positions.get(field_id) {
            Some(&idx) => groups[idx].rows.push(row.clone()),
            None => {
                positions.insert(field_id, groups.len());
                groups.push(FieldGroup {
                    field_id: field_id.to_string(),
                    rows: vec![row.clone()],
                });
            }
        }
    }
    groups
}

/// File-name stem for a field identifier.
///
/// Path separators and other characters that are awkward in file names are
/// replaced with `_`.
pub fn safe_file_stem(field_id: &str) -> String {
    let stem: String = field_id
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|ch| ch == '.') {
        "_".to_string()
    } else {
        stem
    }
}

/// File stems handed out within one batch.
///
/// Distinct field identifiers can sanitize to the same stem (`bp/sys`,
/// `bp sys`), and case-insensitive file systems fold `BP` onto `bp`. A stem
/// already claimed gets a numeric suffix.
#[derive(Debug, Default)]
pub struct FileStems {
    claimed: BTreeSet<String>,
}

impl FileStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a stem for `field_id` that no earlier call returned.
    pub fn claim(&mut self, field_id: &str) -> String {
        let base = safe_file_stem(field_id);
        let mut stem = base.clone();
        let mut counter = 2usize;
        while !self.claimed.insert(stem.to_lowercase()) {
            stem = format!("{base}_{counter}");
            counter += 1;
        }
        stem
    }
}

/// Write one group to `<dir>/<stem>.csv` with the table's header.
pub fn export_group(
    dir: &Path,
    stem: &str,
    columns: &[String],
    group: &FieldGroup,
) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.csv"));
    let records = group
        .rows
        .iter()
        .map(|row| columns.iter().map(|column| row.cell(column)).collect());
    write_csv_table(&path, columns, records)?;
    Ok(path)
}
