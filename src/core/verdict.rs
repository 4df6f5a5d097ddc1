use crate::domain::model::{GateResult, MatchVerdict, ScoreBreakdown};

pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 80.0;

/// Accepts when both gates passed and the percentage reaches the threshold (inclusive).
pub fn verdict(
    score: ScoreBreakdown,
    gates: GateResult,
    issues: Vec<String>,
    threshold: f64,
) -> MatchVerdict {
    let accepted = gates.all_passed() && score.percentage >= threshold;
    MatchVerdict {
        score,
        gates,
        issues,
        accepted,
    }
}
