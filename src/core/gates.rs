use crate::domain::model::{GateResult, ParsedProduct};
use crate::domain::ports::EquivalenceRules;

#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub result: GateResult,
    /// True when a gate failed and weighted scoring must not run.
    pub short_circuited: bool,
    pub issues: Vec<String>,
}

/// Runs the model gate, then the product-type gate; the first failure stops evaluation.
pub fn evaluate<R: EquivalenceRules + ?Sized>(
    reference: &ParsedProduct,
    candidate: &ParsedProduct,
    rules: &R,
) -> GateOutcome {
    let mut result = GateResult::default();
    let reference_model = &reference.descriptor.model;
    let candidate_model = &candidate.descriptor.model;

    // An empty reference model identifies nothing, so it never passes.
    let model_matches =
        !reference_model.is_empty() && reference_model.eq_ignore_ascii_case(candidate_model);
    if !model_matches {
        tracing::debug!(
            "Model gate failed: '{}' vs '{}'",
            reference_model,
            candidate_model
        );
        return GateOutcome {
            result,
            short_circuited: true,
            issues: vec![format!(
                "Model mismatch: '{}' ≠ '{}'",
                reference_model, candidate_model
            )],
        };
    }
    result.model_gate_passed = true;

    let reference_typed = reference
        .descriptor
        .series
        .iter()
        .any(|token| rules.is_type_marker(token));
    if reference_typed && !has_type_marker(candidate, rules) {
        tracing::debug!("Type gate failed for '{}'", candidate.text);
        return GateOutcome {
            result,
            short_circuited: true,
            issues: vec!["Missing INV/INVERTER in candidate".to_string()],
        };
    }
    result.type_gate_passed = true;

    GateOutcome {
        result,
        short_circuited: false,
        issues: Vec::new(),
    }
}

fn has_type_marker<R: EquivalenceRules + ?Sized>(candidate: &ParsedProduct, rules: &R) -> bool {
    let upper = candidate.upper_text();
    rules
        .type_markers()
        .iter()
        .any(|marker| upper.contains(marker.as_str()))
        || upper.split_whitespace().any(|word| rules.is_type_marker(word))
}
