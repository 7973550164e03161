//! Preprocessing: schema validation, mapping indices and row expansion.
//!
//! The stages run in order:
//!
//! 1. [`validate_inputs`] checks both tables for their required columns.
//! 2. [`build_mapping_indices`] groups candidate definitions per field and
//!    builds the categorical lookup used for procedure-result indirection.
//! 3. [`expand_rows`] matches every case record against the candidates and
//!    emits one [`NormalizedRow`](casemap_model::NormalizedRow) per match.
//!
//! [`process_data`] runs all three.

#![deny(unsafe_code)]

pub mod expand;
pub mod index;
pub mod resolve;
pub mod schema;

pub use expand::{expand_rows, matches_candidate, process_data};
pub use index::{FieldIndex, ProcedureResultIndex, build_mapping_indices};
pub use resolve::{coerce_integer, resolve_procedure_result, resolve_value};
pub use schema::validate_inputs;
