//! YARRRML rule generation from normalized case rows.
//!
//! [`generate_document`] deduplicates rows by field identifier, dispatches
//! each field's pattern type to its ordered [`RuleTemplate`] handlers and
//! prefixes the static header from [`render_header`].

#![deny(unsafe_code)]

pub mod assembler;
pub mod block;
pub mod header;
pub mod pattern;
pub mod templates;
pub mod uri;

pub use assembler::{Diagnostic, GeneratedDocument, generate_document, render_row};
pub use block::{FunctionCall, RuleBlock};
pub use header::{PREFIXES, render_header};
pub use pattern::templates_for;
pub use templates::{RowTerms, RuleTemplate};
pub use uri::extract_last_part;
