//! Pattern type to handler dispatch.

use casemap_model::PatternType;

use crate::templates::RuleTemplate;

const OBSERVATION: &[RuleTemplate] = &[
    RuleTemplate::ObservationResultStatement,
    RuleTemplate::ProcedureReference,
    RuleTemplate::PrimitiveValue,
];

const SITUATION: &[RuleTemplate] = &[
    RuleTemplate::ClinicalSituationStatement,
    RuleTemplate::ProcedureReference,
];

const PROCEDURE: &[RuleTemplate] = &[
    RuleTemplate::ClinicalProcedureStatement,
    RuleTemplate::RepresentedProcedure,
    RuleTemplate::ProcedureReference,
];

/// Ordered handlers for a pattern type; `None` for unrecognized labels.
pub fn templates_for(pattern: &PatternType) -> Option<&'static [RuleTemplate]> {
    match pattern {
        PatternType::ObservationResultStatement => Some(OBSERVATION),
        PatternType::ClinicalSituationStatement => Some(SITUATION),
        PatternType::ClinicalProcedureStatement => Some(PROCEDURE),
        PatternType::Unrecognized(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_order() {
        let names: Vec<&str> = templates_for(&PatternType::ClinicalProcedureStatement)
            .unwrap_or_default()
            .iter()
            .map(RuleTemplate::as_str)
            .collect();
        insta::assert_snapshot!(
            names.join(" | "),
            @"clinical-procedure statement | represented procedure | procedure reference"
        );
        assert_eq!(templates_for(&PatternType::parse("Foo")), None);
        assert_eq!(templates_for(&PatternType::parse("")), None);
    }
}
