use crate::config::OverlapWeights;
use crate::domain::model::{MatchVerdict, ProductDescriptor, Session, SessionChoice};
use crate::utils::error::Result;
use crate::utils::validation::validate_percentage;

pub const REASON_NO_CANDIDATES: &str = "no candidates";
pub const REASON_NO_GATE_PASS: &str = "no candidate passed the gates";
pub const REASON_BELOW_FLOOR: &str = "best candidate below selection floor";

/// Minimum percentage a winner must reach. May be stricter than the
/// acceptance threshold when the selection triggers an irreversible action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    floor: f64,
}

impl SelectionPolicy {
    pub fn new(floor: f64) -> Result<Self> {
        validate_percentage("selection_floor", floor)?;
        Ok(Self { floor })
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }
}

/// Picks the strictly highest-scoring candidate that passed both gates;
/// ties go to the earliest in input order.
pub fn select_winner(verdicts: &[MatchVerdict], policy: &SelectionPolicy) -> (Option<usize>, String) {
    if verdicts.is_empty() {
        return (None, REASON_NO_CANDIDATES.to_string());
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, verdict) in verdicts.iter().enumerate() {
        if !verdict.gates.all_passed() {
            continue;
        }
        let percentage = verdict.score.percentage;
        if best.map_or(true, |(_, top)| percentage > top) {
            best = Some((index, percentage));
        }
    }

    match best {
        None => (None, REASON_NO_GATE_PASS.to_string()),
        Some((_, percentage)) if percentage < policy.floor() => {
            (None, REASON_BELOW_FLOOR.to_string())
        }
        Some((index, percentage)) => (
            Some(index),
            format!("candidate {} selected at {:.1}%", index, percentage),
        ),
    }
}

/// Presence-only overlap of one normalized listing with the reference.
pub fn component_overlap(
    reference: &ProductDescriptor,
    listing: &str,
    weights: &OverlapWeights,
) -> f64 {
    let listing = listing.to_uppercase();
    let mut score = 0.0;

    if !reference.manufacturer.is_empty() && listing.contains(&reference.manufacturer) {
        score += weights.manufacturer;
    }
    if !reference.series.is_empty()
        && reference
            .series
            .iter()
            .all(|token| listing.contains(token.as_str()))
    {
        score += weights.series;
    }
    if !reference.model.is_empty() && listing.contains(&reference.model.to_uppercase()) {
        score += weights.model;
    }

    score
}

/// Mean overlap across a session's listings; an empty session scores zero.
pub fn mean_overlap<S: AsRef<str>>(
    reference: &ProductDescriptor,
    listings: &[S],
    weights: &OverlapWeights,
) -> f64 {
    if listings.is_empty() {
        return 0.0;
    }
    let total: f64 = listings
        .iter()
        .map(|listing| component_overlap(reference, listing.as_ref(), weights))
        .sum();
    total / listings.len() as f64
}

/// Higher mean wins; a tie keeps session A.
pub fn choose_session(score_a: f64, score_b: f64) -> SessionChoice {
    let winner = if score_a >= score_b {
        Session::A
    } else {
        Session::B
    };
    SessionChoice {
        winner,
        score_a,
        score_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GateResult, ScoreBreakdown};

    fn scored(percentage: f64, gates_passed: bool) -> MatchVerdict {
        MatchVerdict {
            score: ScoreBreakdown {
                percentage,
                total: percentage / 10.0,
                ..ScoreBreakdown::zero(10.0)
            },
            gates: GateResult {
                model_gate_passed: gates_passed,
                type_gate_passed: gates_passed,
            },
            issues: Vec::new(),
            accepted: gates_passed && percentage >= 80.0,
        }
    }

    fn descriptor() -> ProductDescriptor {
        ProductDescriptor {
            manufacturer: "ELECTRA".to_string(),
            series: vec!["MAX".to_string(), "INV".to_string()],
            model: "170".to_string(),
        }
    }

    #[test]
    fn test_selects_highest_percentage() {
        let policy = SelectionPolicy::new(80.0).unwrap();
        let verdicts = vec![scored(92.0, true), scored(60.0, true), scored(0.0, false)];
        let (winner, reason) = select_winner(&verdicts, &policy);
        assert_eq!(winner, Some(0));
        assert_eq!(reason, "candidate 0 selected at 92.0%");
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let policy = SelectionPolicy::new(50.0).unwrap();
        let verdicts = vec![scored(70.0, true), scored(95.0, true), scored(95.0, true)];
        assert_eq!(select_winner(&verdicts, &policy).0, Some(1));
    }

    #[test]
    fn test_below_floor_has_no_winner() {
        let policy = SelectionPolicy::new(95.0).unwrap();
        let verdicts = vec![scored(92.0, true), scored(60.0, true)];
        let (winner, reason) = select_winner(&verdicts, &policy);
        assert_eq!(winner, None);
        assert_eq!(reason, REASON_BELOW_FLOOR);
    }

    #[test]
    fn test_all_failing_and_empty_sets() {
        let policy = SelectionPolicy::new(0.0).unwrap();
        let verdicts = vec![scored(0.0, false), scored(0.0, false)];
        assert_eq!(
            select_winner(&verdicts, &policy),
            (None, REASON_NO_GATE_PASS.to_string())
        );
        assert_eq!(
            select_winner(&[], &policy),
            (None, REASON_NO_CANDIDATES.to_string())
        );
    }

    #[test]
    fn test_selection_policy_validation() {
        assert!(SelectionPolicy::new(100.0).is_ok());
        assert!(SelectionPolicy::new(100.1).is_err());
        assert!(SelectionPolicy::new(-1.0).is_err());
    }

    #[test]
    fn test_component_overlap() {
        let weights = OverlapWeights::default();
        let reference = descriptor();
        assert!((component_overlap(&reference, "Electra Max Inv 170", &weights) - 1.0).abs() < 1e-9);
        assert!((component_overlap(&reference, "ELECTRA MAX 170", &weights) - 0.7).abs() < 1e-9);
        assert!((component_overlap(&reference, "TADIRAN 12", &weights)).abs() < 1e-9);
    }

    #[test]
    fn test_mean_overlap_and_empty_session() {
        let weights = OverlapWeights::default();
        let reference = descriptor();
        let listings = ["ELECTRA MAX INV 170", "TADIRAN 12"];
        assert!((mean_overlap(&reference, &listings, &weights) - 0.5).abs() < 1e-9);
        let empty: [&str; 0] = [];
        assert_eq!(mean_overlap(&reference, &empty, &weights), 0.0);
    }

    #[test]
    fn test_choose_session_ties_default_to_a() {
        assert_eq!(choose_session(0.5, 0.5).winner, Session::A);
        assert_eq!(choose_session(0.4, 0.6).winner, Session::B);
        assert_eq!(choose_session(0.9, 0.1).winner, Session::A);
    }
}
