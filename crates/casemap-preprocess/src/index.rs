//! Lookup structures built once from the mapping table.

use std::collections::BTreeMap;

use casemap_model::MappingDefinition;

/// Candidate mapping definitions per field identifier.
///
/// Fields iterate in first-seen order and each field keeps its candidates in
/// source order; nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    order: Vec<String>,
    candidates: BTreeMap<String, Vec<MappingDefinition>>,
}

impl FieldIndex {
    fn push(&mut self, definition: &MappingDefinition) {
        let field = definition.field_id.as_str();
        match self.candidates.get_mut(field) {
            Some(list) => list.push(definition.clone()),
            None => {
                self.order.push(field.to_string());
                self.candidates
                    .insert(field.to_string(), vec![definition.clone()]);
            }
        }
    }

    /// Candidates for `field`, empty when the field is not mapped.
    pub fn candidates(&self, field: &str) -> &[MappingDefinition] {
        self.candidates.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields with their candidates, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MappingDefinition])> {
        self.order
            .iter()
            .map(|field| (field.as_str(), self.candidates(field)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Categorical literal to ontology term, per field identifier.
///
/// Only definitions carrying both a categorical value and its ontology
/// mapping contribute. A later definition with the same literal replaces the
/// earlier term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureResultIndex {
    terms: BTreeMap<String, BTreeMap<String, String>>,
}

impl ProcedureResultIndex {
    fn insert(&mut self, field: &str, literal: &str, term: &str) {
        self.terms
            .entry(field.to_string())
            .or_default()
            .insert(literal.to_string(), term.to_string());
    }

    /// Term for `literal` in `field`'s categorical lookup.
    pub fn lookup(&self, field: &str, literal: &str) -> Option<&str> {
        self.terms
            .get(field)
            .and_then(|terms| terms.get(literal))
            .map(String::as_str)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.terms.contains_key(field)
    }
}

/// Build both indices in a single pass over `definitions`.
pub fn build_mapping_indices<'a, I>(definitions: I) -> (FieldIndex, ProcedureResultIndex)
where
    I: IntoIterator<Item = &'a MappingDefinition>,
{
    let mut fields = FieldIndex::default();
    let mut procedures = ProcedureResultIndex::default();
    for definition in definitions {
        fields.push(definition);
        if let (Some(literal), Some(term)) = (
            definition.categorical_value.as_deref(),
            definition.categorical_ontology_mapping.as_deref(),
        ) {
            procedures.insert(&definition.field_id, literal, term);
        }
    }
    tracing::debug!(
        field_count = fields.len(),
        categorical_fields = procedures.terms.len(),
        "built mapping indices"
    );
    (fields, procedures)
}
