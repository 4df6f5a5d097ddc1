use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "product-match")]
#[command(about = "Score candidate product descriptions against a reference")]
pub struct CliConfig {
    /// Reference product description
    #[arg(long)]
    pub reference: String,

    /// Candidate descriptions; more than one runs best-of-list arbitration
    #[arg(long = "candidate", required = true)]
    pub candidates: Vec<String>,

    /// Target model to prefer when a candidate carries several numbers
    #[arg(long)]
    pub model_hint: Option<String>,

    /// TOML file overriding weights, threshold and lookup tables
    #[arg(long)]
    pub config: Option<String>,

    /// Override the acceptance threshold (percent)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Minimum winning percentage for arbitration
    #[arg(long, default_value = "80")]
    pub selection_floor: f64,

    /// Print a human-readable breakdown instead of JSON
    #[arg(long)]
    pub explain: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
