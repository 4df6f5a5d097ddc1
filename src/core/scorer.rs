use crate::config::ScoringWeights;
use crate::core::parser::is_calendar_year;
use crate::domain::model::{ParsedProduct, ScoreBreakdown};
use crate::domain::ports::EquivalenceRules;

/// Credit for an optional spec marker missing from the candidate.
pub const OPTIONAL_SPEC_CREDIT: f64 = 0.7;
/// Ceiling on the total extra-word deduction.
pub const MAX_EXTRA_WORD_PENALTY: f64 = 1.0;
/// How many offending words the extra-words issue lists.
const EXTRA_WORDS_REPORTED: usize = 5;
/// Percentages are kept to nine decimals so `9.1 / 10` reads as exactly 91.
const PERCENTAGE_SCALE: f64 = 1e9;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub breakdown: ScoreBreakdown,
    pub issues: Vec<String>,
}

/// Weighted component scoring. Callers run it only after both gates passed,
/// so the model component always earns its full weight.
pub fn score<R: EquivalenceRules + ?Sized>(
    reference: &ParsedProduct,
    candidate: &ParsedProduct,
    weights: &ScoringWeights,
    rules: &R,
) -> ScoreOutcome {
    let mut issues = Vec::new();
    let candidate_upper = candidate.upper_text();
    let candidate_words: Vec<&str> = candidate_upper.split_whitespace().collect();
    let descriptor = &reference.descriptor;

    let manufacturer_points = if candidate_upper.contains(descriptor.manufacturer.as_str()) {
        weights.manufacturer
    } else {
        issues.push(format!("Manufacturer '{}' not found", descriptor.manufacturer));
        0.0
    };

    let (series_fraction, missing) =
        series_match(&descriptor.series, &candidate_upper, &candidate_words, rules);
    if !missing.is_empty() {
        issues.push(format!("Missing series components: {}", missing.join(", ")));
    }
    let series_points = series_fraction * weights.series;

    let model_points = weights.model;

    let extra_words = extra_words(reference, &candidate_words, rules);
    let extra_word_penalty =
        (extra_words.len() as f64 * weights.extra_word_penalty).min(MAX_EXTRA_WORD_PENALTY);
    if extra_word_penalty > 0.0 {
        let listed: Vec<&str> = extra_words.iter().take(EXTRA_WORDS_REPORTED).copied().collect();
        issues.push(format!("Extra words penalty: {}", listed.join(", ")));
    }

    let max_total = weights.max_total();
    let total =
        (manufacturer_points + series_points + model_points - extra_word_penalty).max(0.0);
    let percentage = if max_total > 0.0 {
        round_percentage(total / max_total * 100.0)
    } else {
        0.0
    };

    tracing::debug!(
        manufacturer = manufacturer_points,
        series = series_points,
        model = model_points,
        penalty = extra_word_penalty,
        "Scored '{}' at {:.1}%",
        candidate.text,
        percentage
    );

    ScoreOutcome {
        breakdown: ScoreBreakdown {
            manufacturer_points,
            series_points,
            model_points,
            extra_word_penalty,
            total,
            max_total,
            percentage,
        },
        issues,
    }
}

fn round_percentage(value: f64) -> f64 {
    (value * PERCENTAGE_SCALE).round() / PERCENTAGE_SCALE
}

/// Fraction of reference series tokens found in the candidate, plus the
/// descriptions of whatever was not found.
fn series_match<R: EquivalenceRules + ?Sized>(
    series: &[String],
    candidate_upper: &str,
    candidate_words: &[&str],
    rules: &R,
) -> (f64, Vec<String>) {
    if series.is_empty() {
        return (1.0, Vec::new());
    }

    let mut matched = 0.0;
    let mut missing = Vec::new();

    for token in series {
        if candidate_upper.contains(token.as_str())
            || candidate_words
                .iter()
                .any(|word| rules.is_equivalent(token, word))
        {
            matched += 1.0;
        } else if token.contains('-') {
            let parts: Vec<&str> = token.split('-').filter(|part| !part.is_empty()).collect();
            if parts.is_empty() {
                missing.push(token.clone());
                continue;
            }
            let absent: Vec<&str> = parts
                .iter()
                .copied()
                .filter(|part| !candidate_upper.contains(part))
                .collect();
            matched += (parts.len() - absent.len()) as f64 / parts.len() as f64;
            if !absent.is_empty() {
                missing.push(format!("{} (from {})", absent.join("-"), token));
            }
        } else if rules.is_optional(token) {
            matched += OPTIONAL_SPEC_CREDIT;
            missing.push(format!("{} (optional)", token));
        } else {
            missing.push(token.clone());
        }
    }

    (matched / series.len() as f64, missing)
}

/// Candidate words unrelated to any reference component, in candidate order.
fn extra_words<'w, R: EquivalenceRules + ?Sized>(
    reference: &ParsedProduct,
    candidate_words: &[&'w str],
    rules: &R,
) -> Vec<&'w str> {
    let components: Vec<String> = reference
        .descriptor
        .components()
        .into_iter()
        .map(str::to_uppercase)
        .collect();

    candidate_words
        .iter()
        .copied()
        .filter(|word| {
            !components
                .iter()
                .any(|component| component.contains(word) || word.contains(component.as_str()))
        })
        .filter(|word| !rules.is_noise_word(word))
        .filter(|word| !is_calendar_year(word))
        .collect()
}
