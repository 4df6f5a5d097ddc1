pub mod arbitrator;
pub mod engine;
pub mod gates;
pub mod normalizer;
pub mod parser;
pub mod registry;
pub mod scorer;
pub mod verdict;

pub use crate::domain::model::{
    ArbitrationResult, GateResult, MatchVerdict, ParsedProduct, ProductDescriptor,
    ScoreBreakdown, Session, SessionChoice,
};
pub use crate::domain::ports::EquivalenceRules;
pub use crate::utils::error::Result;
