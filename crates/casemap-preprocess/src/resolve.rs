//! Per-record value resolution.

use casemap_model::{CaseRecord, FieldValue, MappingDefinition, ValueType};

use crate::index::ProcedureResultIndex;

/// Coerce a raw cell to an integer.
///
/// Accepts an optionally signed integer literal, or a decimal literal whose
/// fractional part is zero (`"70.0"`). Surrounding whitespace is ignored.
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if let Ok(number) = text.parse::<i64>() {
        return Some(number);
    }
    let number = text.parse::<f64>().ok()?;
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return None;
    }
    Some(number as i64)
}

/// Resolve the value of the definition's field for one case.
///
/// `None` means the candidate must be skipped: a Boolean or Integer field
/// with no value, or an Integer field whose value does not coerce. Other
/// types pass the raw value through unchanged, absence included.
pub fn resolve_value(record: &CaseRecord, definition: &MappingDefinition) -> Option<FieldValue> {
    let raw = record.get(&definition.field_id);
    match definition.value_type {
        ValueType::Boolean => raw.map(|value| FieldValue::Text(value.to_string())),
        ValueType::Integer => raw.and_then(coerce_integer).map(FieldValue::Integer),
        _ => Some(
            raw.map(|value| FieldValue::Text(value.to_string()))
                .unwrap_or(FieldValue::Empty),
        ),
    }
}

/// Resolve the procedure-result term of a definition for one case.
///
/// The definition names another field; that field's raw value in the record
/// is translated through the referenced field's own categorical lookup. Any
/// missing step yields `None`.
pub fn resolve_procedure_result(
    record: &CaseRecord,
    definition: &MappingDefinition,
    procedures: &ProcedureResultIndex,
) -> Option<String> {
    let referenced = definition.procedure_result.as_deref()?;
    if referenced.is_empty() || !record.has_column(referenced) {
        return None;
    }
    let literal = record.get(referenced)?;
    procedures
        .lookup(referenced, literal)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::index::build_mapping_indices;

    fn record(cells: &[(&str, &str)]) -> CaseRecord {
        CaseRecord::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn definition(field: &str, value_type: ValueType) -> MappingDefinition {
        MappingDefinition {
            field_id: field.to_string(),
            value_type,
            ..MappingDefinition::default()
        }
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(coerce_integer("70"), Some(70));
        assert_eq!(coerce_integer(" -3 "), Some(-3));
        assert_eq!(coerce_integer("70.0"), Some(70));
        assert_eq!(coerce_integer("70.5"), None);
        assert_eq!(coerce_integer("seventy"), None);
        assert_eq!(coerce_integer("NaN"), None);
        assert_eq!(coerce_integer("1e300"), None);
    }

    #[test]
    fn boolean_passes_value_or_skips() {
        let def = definition("smoker", ValueType::Boolean);
        assert_eq!(
            resolve_value(&record(&[("smoker", "True")]), &def),
            Some(FieldValue::Text("True".to_string()))
        );
        assert_eq!(resolve_value(&record(&[("smoker", "")]), &def), None);
    }

    #[test]
    fn integer_skips_on_missing_or_bad_value() {
        let def = definition("weight", ValueType::Integer);
        assert_eq!(
            resolve_value(&record(&[("weight", "70")]), &def),
            Some(FieldValue::Integer(70))
        );
        assert_eq!(resolve_value(&record(&[("weight", "heavy")]), &def), None);
        assert_eq!(resolve_value(&record(&[("weight", "")]), &def), None);
    }

    #[test]
    fn other_types_pass_through_unchanged() {
        let def = definition("note", ValueType::String);
        assert_eq!(
            resolve_value(&record(&[("note", " as is ")]), &def),
            Some(FieldValue::Text(" as is ".to_string()))
        );
        assert_eq!(
            resolve_value(&record(&[("note", "")]), &def),
            Some(FieldValue::Empty)
        );
        let float = definition("bmi", ValueType::Float);
        assert_eq!(
            resolve_value(&record(&[("bmi", "22.5")]), &float),
            Some(FieldValue::Text("22.5".to_string()))
        );
    }

    #[test]
    fn procedure_result_comes_from_the_referenced_field() {
        let mappings = vec![
            MappingDefinition {
                field_id: "biopsy".to_string(),
                categorical_value: Some("Yes".to_string()),
                categorical_ontology_mapping: Some("sct:Biopsy".to_string()),
                ..MappingDefinition::default()
            },
            MappingDefinition {
                field_id: "stage".to_string(),
                categorical_value: Some("Yes".to_string()),
                categorical_ontology_mapping: Some("sct:WrongTerm".to_string()),
                procedure_result: Some("biopsy".to_string()),
                ..MappingDefinition::default()
            },
        ];
        let (_, procedures) = build_mapping_indices(&mappings);
        let case = record(&[("stage", "Yes"), ("biopsy", "Yes")]);
        assert_eq!(
            resolve_procedure_result(&case, &mappings[1], &procedures),
            Some("sct:Biopsy".to_string())
        );
    }

    #[test]
    fn procedure_result_absent_when_any_step_fails() {
        let (_, procedures) = build_mapping_indices(&[]);
        let mut def = definition("stage", ValueType::Categorical);
        let case = record(&[("stage", "II"), ("biopsy", "")]);
        assert_eq!(resolve_procedure_result(&case, &def, &procedures), None);

        def.procedure_result = Some("biopsy".to_string());
        assert_eq!(resolve_procedure_result(&case, &def, &procedures), None);

        def.procedure_result = Some("surgery".to_string());
        assert_eq!(resolve_procedure_result(&case, &def, &procedures), None);

        let case = record(&[("stage", "II"), ("biopsy", "Maybe")]);
        def.procedure_result = Some("biopsy".to_string());
        assert_eq!(resolve_procedure_result(&case, &def, &procedures), None);
    }
}
