use crate::config::EngineConfig;
use crate::core::arbitrator::{self, SelectionPolicy};
use crate::core::normalizer::normalize;
use crate::core::parser::ComponentParser;
use crate::core::registry::EquivalenceRegistry;
use crate::core::{gates, scorer, verdict};
use crate::domain::model::{
    ArbitrationResult, MatchVerdict, ParsedProduct, ProductDescriptor, ScoreBreakdown,
    SessionChoice,
};
use crate::domain::ports::EquivalenceRules;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rayon::prelude::*;

/// Normalize, parse, gate, score and judge. Holds only read-only
/// configuration, so one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct MatchEngine<R = EquivalenceRegistry> {
    config: EngineConfig,
    rules: R,
    parser: ComponentParser,
}

impl MatchEngine<EquivalenceRegistry> {
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default(), EquivalenceRegistry::default())
    }
}

impl<R: EquivalenceRules> MatchEngine<R> {
    /// Fails fast on invalid weights or threshold; scoring itself never fails.
    pub fn new(config: EngineConfig, rules: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rules,
            parser: ComponentParser::new()?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.rules)
    }

    pub fn parse(&self, text: &str, preferred_model: Option<&str>) -> ProductDescriptor {
        self.parser.parse(&self.normalize(text), preferred_model, &self.rules)
    }

    pub fn prepare(&self, text: &str, preferred_model: Option<&str>) -> ParsedProduct {
        let text = self.normalize(text);
        let descriptor = self.parser.parse(&text, preferred_model, &self.rules);
        ParsedProduct { text, descriptor }
    }

    pub fn evaluate(&self, reference: &str, candidate: &str) -> MatchVerdict {
        self.evaluate_with_hint(reference, candidate, None)
    }

    pub fn evaluate_with_hint(
        &self,
        reference: &str,
        candidate: &str,
        model_hint: Option<&str>,
    ) -> MatchVerdict {
        let reference = self.prepare(reference, model_hint);
        self.evaluate_against(&reference, candidate, model_hint)
    }

    /// Scores one candidate against an already prepared reference. The
    /// candidate's model is the hint if it carries it, else the reference's
    /// own model number if it carries that, else its default pick.
    pub fn evaluate_against(
        &self,
        reference: &ParsedProduct,
        candidate: &str,
        model_hint: Option<&str>,
    ) -> MatchVerdict {
        let text = self.normalize(candidate);
        let numbers = self.parser.numeric_tokens(&text);
        let preferred = [model_hint, Some(reference.descriptor.model.as_str())]
            .into_iter()
            .flatten()
            .find(|model| !model.is_empty() && numbers.contains(model));
        let descriptor = self.parser.parse(&text, preferred, &self.rules);
        let candidate = ParsedProduct { text, descriptor };
        let threshold = self.config.acceptance_threshold;

        let outcome = gates::evaluate(reference, &candidate, &self.rules);
        if outcome.short_circuited {
            return verdict::verdict(
                ScoreBreakdown::zero(self.config.weights.max_total()),
                outcome.result,
                outcome.issues,
                threshold,
            );
        }

        let scored = scorer::score(reference, &candidate, &self.config.weights, &self.rules);
        verdict::verdict(scored.breakdown, outcome.result, scored.issues, threshold)
    }

    /// One verdict per candidate, in input order.
    pub fn score_all<S: AsRef<str> + Sync>(
        &self,
        reference: &str,
        candidates: &[S],
        model_hint: Option<&str>,
    ) -> Vec<MatchVerdict> {
        let reference = self.prepare(reference, model_hint);
        candidates
            .par_iter()
            .map(|candidate| self.evaluate_against(&reference, candidate.as_ref(), model_hint))
            .collect()
    }

    pub fn best_of_list<S: AsRef<str> + Sync>(
        &self,
        reference: &str,
        candidates: &[S],
        model_hint: Option<&str>,
        policy: &SelectionPolicy,
    ) -> ArbitrationResult {
        let verdicts = self.score_all(reference, candidates, model_hint);
        let (winner, reason) = arbitrator::select_winner(&verdicts, policy);
        tracing::info!(
            candidates = verdicts.len(),
            winner = ?winner,
            floor = policy.floor(),
            "Arbitration for '{}': {}",
            reference,
            reason
        );
        ArbitrationResult {
            winner,
            verdicts,
            reason,
        }
    }

    /// Compares two acquisition sessions by mean component overlap.
    pub fn best_of_two<S: AsRef<str>>(
        &self,
        reference: &str,
        session_a: &[S],
        session_b: &[S],
    ) -> SessionChoice {
        let reference = self.parse(reference, None);
        let weights = &self.config.overlap;
        let normalize_all = |listings: &[S]| -> Vec<String> {
            listings
                .iter()
                .map(|listing| self.normalize(listing.as_ref()))
                .collect()
        };

        let score_a = arbitrator::mean_overlap(&reference, &normalize_all(session_a), weights);
        let score_b = arbitrator::mean_overlap(&reference, &normalize_all(session_b), weights);
        let choice = arbitrator::choose_session(score_a, score_b);
        tracing::info!(
            "Session A score {:.2}, session B score {:.2}, winner {:?}",
            score_a,
            score_b,
            choice.winner
        );
        choice
    }
}
