use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic components parsed out of one product description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub manufacturer: String,
    pub series: Vec<String>,
    pub model: String,
}

impl ProductDescriptor {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_empty() && self.series.is_empty() && self.model.is_empty()
    }

    /// Non-empty components in manufacturer, series, model order.
    pub fn components(&self) -> Vec<&str> {
        std::iter::once(self.manufacturer.as_str())
            .chain(self.series.iter().map(String::as_str))
            .chain(std::iter::once(self.model.as_str()))
            .filter(|component| !component.is_empty())
            .collect()
    }
}

/// Normalized text together with the descriptor parsed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProduct {
    pub text: String,
    pub descriptor: ProductDescriptor,
}

impl ParsedProduct {
    pub fn upper_text(&self) -> String {
        self.text.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub manufacturer_points: f64,
    pub series_points: f64,
    pub model_points: f64,
    pub extra_word_penalty: f64,
    pub total: f64,
    pub max_total: f64,
    pub percentage: f64,
}

impl ScoreBreakdown {
    /// Breakdown for a candidate disqualified by a gate.
    pub fn zero(max_total: f64) -> Self {
        Self {
            manufacturer_points: 0.0,
            series_points: 0.0,
            model_points: 0.0,
            extra_word_penalty: 0.0,
            total: 0.0,
            max_total,
            percentage: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub model_gate_passed: bool,
    pub type_gate_passed: bool,
}

impl GateResult {
    pub fn all_passed(&self) -> bool {
        self.model_gate_passed && self.type_gate_passed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub score: ScoreBreakdown,
    pub gates: GateResult,
    pub issues: Vec<String>,
    pub accepted: bool,
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = &self.score;
        writeln!(f, "SCORING BREAKDOWN ({:.1}%)", score.percentage)?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(
            f,
            "Gates:        model {}, type {}",
            pass_label(self.gates.model_gate_passed),
            pass_label(self.gates.type_gate_passed)
        )?;
        if self.gates.all_passed() {
            writeln!(f, "Manufacturer: {:.1} points", score.manufacturer_points)?;
            writeln!(f, "Series/Tech:  {:.1} points", score.series_points)?;
            writeln!(f, "Model Number: {:.1} points", score.model_points)?;
            if score.extra_word_penalty > 0.0 {
                writeln!(f, "Extra Words:  -{:.1} points (penalty)", score.extra_word_penalty)?;
            }
        }
        writeln!(f, "{}", "-".repeat(50))?;
        write!(
            f,
            "TOTAL SCORE:  {:.1}/{:.1} points ({:.1}%) {}",
            score.total,
            score.max_total,
            score.percentage,
            if self.accepted { "ACCEPTED" } else { "NEEDS REVIEW" }
        )?;
        if !self.issues.is_empty() {
            write!(f, "\n\nISSUES FOUND:")?;
            for issue in &self.issues {
                write!(f, "\n  - {}", issue)?;
            }
        }
        Ok(())
    }
}

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "passed"
    } else {
        "failed"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationResult {
    pub winner: Option<usize>,
    /// Parallel to the candidate list, in input order.
    pub verdicts: Vec<MatchVerdict>,
    pub reason: String,
}

/// One of the two independent acquisition strategies compared by best-of-two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionChoice {
    pub winner: Session,
    pub score_a: f64,
    pub score_b: f64,
}
