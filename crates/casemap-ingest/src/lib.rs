#![deny(unsafe_code)]

pub mod clean;
pub mod csv_table;
pub mod error;
pub mod export;
pub mod loaders;

pub use clean::trim_mapping_table;
pub use csv_table::{CsvTable, read_csv_table, write_csv_table};
pub use error::{IngestError, Result};
pub use export::{FieldGroup, FileStems, export_group, group_by_field, safe_file_stem};
pub use loaders::{
    load_data_table, load_mapping_table, load_normalized_table, write_normalized_table,
};
