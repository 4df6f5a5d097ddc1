use clap::Parser;
use product_match::utils::{logger, validation::Validate};
use product_match::{CliConfig, MatchEngine, MatchError, SelectionPolicy, TomlConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting product-match CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!("❌ Matching failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), MatchError> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    file_config.validate()?;

    let mut engine_config = file_config.engine_config();
    if let Some(threshold) = config.threshold {
        tracing::info!("🔧 Acceptance threshold overridden to: {}", threshold);
        engine_config = engine_config.with_threshold(threshold);
    }

    let engine = MatchEngine::new(engine_config, file_config.registry()?)?;
    let hint = config.model_hint.as_deref();

    if let [candidate] = config.candidates.as_slice() {
        let verdict = engine.evaluate_with_hint(&config.reference, candidate, hint);
        if config.explain {
            println!("{}", verdict);
        } else {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        return Ok(());
    }

    let policy = SelectionPolicy::new(config.selection_floor)?;
    let result = engine.best_of_list(&config.reference, &config.candidates, hint, &policy);
    if config.explain {
        for (index, verdict) in result.verdicts.iter().enumerate() {
            println!("[{}] {}\n{}\n", index, config.candidates[index], verdict);
        }
        println!("Winner: {:?} ({})", result.winner, result.reason);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
