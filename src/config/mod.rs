#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::verdict::DEFAULT_ACCEPTANCE_THRESHOLD;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{validate_non_negative, validate_percentage, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub manufacturer: f64,
    pub series: f64,
    pub model: f64,
    /// Deduction per unrelated candidate word.
    pub extra_word_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            manufacturer: 1.0,
            series: 4.0,
            model: 5.0,
            extra_word_penalty: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn max_total(&self) -> f64 {
        self.manufacturer + self.series + self.model
    }
}

impl Validate for ScoringWeights {
    fn validate(&self) -> Result<()> {
        validate_non_negative("scoring.manufacturer_weight", self.manufacturer)?;
        validate_non_negative("scoring.series_weight", self.series)?;
        validate_non_negative("scoring.model_weight", self.model)?;
        validate_non_negative("scoring.extra_word_penalty", self.extra_word_penalty)?;

        if self.max_total() <= 0.0 {
            return Err(MatchError::InvalidConfigValueError {
                field: "scoring".to_string(),
                value: self.max_total().to_string(),
                reason: "At least one component weight must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Presence-only weights used when comparing two acquisition sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapWeights {
    pub manufacturer: f64,
    pub series: f64,
    pub model: f64,
}

impl Default for OverlapWeights {
    fn default() -> Self {
        Self {
            manufacturer: 0.4,
            series: 0.3,
            model: 0.3,
        }
    }
}

impl Validate for OverlapWeights {
    fn validate(&self) -> Result<()> {
        validate_non_negative("overlap.manufacturer", self.manufacturer)?;
        validate_non_negative("overlap.series", self.series)?;
        validate_non_negative("overlap.model", self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub acceptance_threshold: f64,
    pub overlap: OverlapWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            overlap: OverlapWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_threshold(mut self, acceptance_threshold: f64) -> Self {
        self.acceptance_threshold = acceptance_threshold;
        self
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        validate_percentage("scoring.acceptance_threshold", self.acceptance_threshold)?;
        self.overlap.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.max_total(), 10.0);
        assert_eq!(config.acceptance_threshold, 80.0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.weights.series = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoring.series_weight"));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let config = EngineConfig {
            weights: ScoringWeights {
                manufacturer: 0.0,
                series: 0.0,
                model: 0.0,
                extra_word_penalty: 0.0,
            },
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(EngineConfig::default().with_threshold(100.0).validate().is_ok());
        assert!(EngineConfig::default().with_threshold(101.0).validate().is_err());
        assert!(EngineConfig::default().with_threshold(-0.1).validate().is_err());
    }

    #[test]
    fn test_negative_overlap_rejected() {
        let mut config = EngineConfig::default();
        config.overlap.model = -0.3;
        assert!(config.validate().is_err());
    }
}
