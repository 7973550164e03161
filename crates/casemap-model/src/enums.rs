//! Enumerations for mapping-table labels.
//!
//! Mapping tables carry value types and pattern types as free text. Both are
//! parsed once at ingestion into closed enumerations with an explicit
//! fallthrough variant that keeps the original label, so unknown labels can
//! still be reported and written back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type of a mapped clinical field.
///
/// Labels are matched exactly after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    Boolean,
    Integer,
    Categorical,
    String,
    Float,
    DateTime,
    /// Any label outside the taxonomy (including an empty cell).
    Other(String),
}

impl ValueType {
    /// Parse a mapping-table label.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Boolean" => ValueType::Boolean,
            "Integer" => ValueType::Integer,
            "Categorical" => ValueType::Categorical,
            "String" => ValueType::String,
            "Float" => ValueType::Float,
            "DateTime" => ValueType::DateTime,
            other => ValueType::Other(other.to_string()),
        }
    }

    /// Returns the label as it appears in mapping tables.
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::Boolean => "Boolean",
            ValueType::Integer => "Integer",
            ValueType::Categorical => "Categorical",
            ValueType::String => "String",
            ValueType::Float => "Float",
            ValueType::DateTime => "DateTime",
            ValueType::Other(label) => label,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueType::Boolean)
    }

    /// XSD datatype used for literal values of this type.
    ///
    /// The lookup is case-insensitive so that labels such as `integer` still
    /// resolve; unknown labels fall back to `xsd:string`.
    pub fn xsd_datatype(&self) -> &'static str {
        match self.as_str().to_ascii_lowercase().as_str() {
            "integer" => "xsd:integer",
            "float" => "xsd:double",
            "datetime" => "xsd:dateTime",
            "boolean" => "xsd:boolean",
            _ => "xsd:string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ValueType {
    fn from(label: String) -> Self {
        ValueType::parse(&label)
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.as_str().to_string()
    }
}

/// Pattern type selecting the family of rule templates for a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternType {
    ObservationResultStatement,
    ClinicalSituationStatement,
    ClinicalProcedureStatement,
    /// Label with no rule templates (including an empty cell).
    Unrecognized(String),
}

impl PatternType {
    /// Parse a mapping-table label (exact match after trimming).
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "ObservationResultStatement" => PatternType::ObservationResultStatement,
            "ClinicalSituationStatement" => PatternType::ClinicalSituationStatement,
            "ClinicalProcedureStatement" => PatternType::ClinicalProcedureStatement,
            other => PatternType::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PatternType::ObservationResultStatement => "ObservationResultStatement",
            PatternType::ClinicalSituationStatement => "ClinicalSituationStatement",
            PatternType::ClinicalProcedureStatement => "ClinicalProcedureStatement",
            PatternType::Unrecognized(label) => label,
        }
    }

    /// True when the mapping row left the pattern type empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, PatternType::Unrecognized(label) if label.is_empty())
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PatternType {
    fn from(label: String) -> Self {
        PatternType::parse(&label)
    }
}

impl From<PatternType> for String {
    fn from(value: PatternType) -> Self {
        value.as_str().to_string()
    }
}
