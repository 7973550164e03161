#![deny(unsafe_code)]

pub mod case;
pub mod columns;
pub mod enums;
pub mod error;
pub mod mapping;
pub mod normalized;

pub use case::{CaseRecord, DataTable};
pub use enums::{PatternType, ValueType};
pub use error::{SchemaError, TableKind};
pub use mapping::{MappingDefinition, MappingTable};
pub use normalized::{FieldValue, NormalizedRow, NormalizedTable};
