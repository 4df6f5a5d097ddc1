use crate::config::{EngineConfig, OverlapWeights, ScoringWeights};
use crate::core::registry::{EquivalenceRegistry, RegistryTables};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based engine setup. Every section is optional; omitted values keep
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub scoring: Option<ScoringSection>,
    pub overlap: Option<OverlapWeights>,
    pub tables: Option<RegistryTables>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringSection {
    pub manufacturer_weight: Option<f64>,
    pub series_weight: Option<f64>,
    pub model_weight: Option<f64>,
    pub extra_word_penalty_per_word: Option<f64>,
    pub acceptance_threshold_percent: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unset ones stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        let Some(scoring) = &self.scoring else {
            return EngineConfig {
                overlap: self.overlap.unwrap_or_default(),
                ..defaults
            };
        };

        EngineConfig {
            weights: ScoringWeights {
                manufacturer: scoring
                    .manufacturer_weight
                    .unwrap_or(defaults.weights.manufacturer),
                series: scoring.series_weight.unwrap_or(defaults.weights.series),
                model: scoring.model_weight.unwrap_or(defaults.weights.model),
                extra_word_penalty: scoring
                    .extra_word_penalty_per_word
                    .unwrap_or(defaults.weights.extra_word_penalty),
            },
            acceptance_threshold: scoring
                .acceptance_threshold_percent
                .unwrap_or(defaults.acceptance_threshold),
            overlap: self.overlap.unwrap_or_default(),
        }
    }

    pub fn registry(&self) -> Result<EquivalenceRegistry> {
        EquivalenceRegistry::new(self.tables.clone().unwrap_or_default())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.engine_config().validate()?;
        self.registry().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::EquivalenceRules;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.engine_config(), EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_scoring_section() {
        let toml_content = r#"
[scoring]
manufacturer_weight = 0.5
series_weight = 4.5
acceptance_threshold_percent = 90.0

[overlap]
manufacturer = 0.2
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let engine = config.engine_config();

        assert_eq!(engine.weights.manufacturer, 0.5);
        assert_eq!(engine.weights.series, 4.5);
        assert_eq!(engine.weights.model, 5.0);
        assert_eq!(engine.weights.extra_word_penalty, 0.1);
        assert_eq!(engine.acceptance_threshold, 90.0);
        assert_eq!(engine.overlap.manufacturer, 0.2);
        assert_eq!(engine.overlap.series, 0.3);
    }

    #[test]
    fn test_tables_override_defaults() {
        let toml_content = r#"
[tables]
optional_tokens = ["WIFI"]
noise_words = ["SALE"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let registry = config.registry().unwrap();

        assert!(registry.is_optional("wifi"));
        assert!(!registry.is_optional("1PH"));
        assert!(registry.is_noise_word("SALE"));
        assert!(registry.is_equivalent("INV", "INVERTER"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRODUCT_MATCH_TEST_THRESHOLD", "85.5");

        let toml_content = r#"
[scoring]
acceptance_threshold_percent = ${PRODUCT_MATCH_TEST_THRESHOLD}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.engine_config().acceptance_threshold, 85.5);

        std::env::remove_var("PRODUCT_MATCH_TEST_THRESHOLD");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[scoring]
model_weight = -5.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[tables]
type_marker = ""
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[scoring\nseries_weight = ").unwrap_err();
        assert!(matches!(err, MatchError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[scoring]
series_weight = 3.0
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.engine_config().weights.series, 3.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/product-match.toml").unwrap_err();
        assert!(matches!(err, MatchError::IoError(_)));
    }
}
