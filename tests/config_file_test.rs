use anyhow::Result;
use product_match::utils::validation::Validate;
use product_match::{MatchEngine, MatchError, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn engine_from(toml_content: &str) -> Result<MatchEngine> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(toml_content.as_bytes())?;

    let config = TomlConfig::from_file(temp_file.path())?;
    config.validate()?;
    Ok(MatchEngine::new(config.engine_config(), config.registry()?)?)
}

#[test]
fn test_market_tables_from_file() -> Result<()> {
    let engine = engine_from(
        r#"
[scoring]
acceptance_threshold_percent = 90.0

[tables]
noise_words = ["SALE", "DEAL"]
optional_tokens = ["WIFI"]

[tables.transliterations]
"סמסונג" = "SAMSUNG"
"#,
    )?;

    let verdict = engine.evaluate("Samsung WindFree WIFI 12", "סמסונג WINDFREE 12 SALE DEAL");

    assert!(verdict.gates.all_passed());
    assert_eq!(verdict.score.manufacturer_points, 1.0);
    assert_eq!(verdict.score.extra_word_penalty, 0.0);
    // WIFI is optional: (1 + 0.7) / 2 of the series weight.
    assert!((verdict.score.series_points - 3.4).abs() < 1e-9);
    assert!((verdict.score.percentage - 94.0).abs() < 1e-9);
    assert!(verdict.accepted);
    Ok(())
}

#[test]
fn test_weights_from_file_change_scores() -> Result<()> {
    let engine = engine_from(
        r#"
[scoring]
manufacturer_weight = 0.0
series_weight = 5.0
model_weight = 5.0
extra_word_penalty_per_word = 0.25
"#,
    )?;

    let verdict = engine.evaluate("Electra MAX INV 170", "MAX INV 170 WHITE");
    assert_eq!(verdict.score.max_total, 10.0);
    assert!((verdict.score.total - 9.75).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_invalid_threshold_fails_at_setup() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(b"[scoring]\nacceptance_threshold_percent = 120.0\n")?;

    let config = TomlConfig::from_file(temp_file.path())?;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, MatchError::InvalidConfigValueError { .. }));
    assert!(err.to_string().contains("scoring.acceptance_threshold"));
    Ok(())
}

#[test]
fn test_latin_transliteration_key_rejected() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(b"[tables.transliterations]\nelectra = \"ELECTRA\"\n")?;

    let config = TomlConfig::from_file(temp_file.path())?;
    assert!(config.registry().is_err());
    Ok(())
}
