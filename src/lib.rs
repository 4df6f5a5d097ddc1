pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{toml_config::TomlConfig, EngineConfig, OverlapWeights, ScoringWeights};
pub use core::{
    arbitrator::SelectionPolicy,
    engine::MatchEngine,
    registry::{EquivalenceRegistry, RegistryTables},
};
pub use domain::model::{
    ArbitrationResult, GateResult, MatchVerdict, ProductDescriptor, ScoreBreakdown, Session,
    SessionChoice,
};
pub use domain::ports::EquivalenceRules;
pub use utils::error::{MatchError, Result};
