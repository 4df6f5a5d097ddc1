use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl MatchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            MatchError::IoError(e) => format!("Could not read input: {}", e),
            MatchError::SerializationError(e) => format!("Could not render output: {}", e),
            MatchError::PatternError(e) => format!("A token pattern failed to compile: {}", e),
            MatchError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            MatchError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' = '{}' is not allowed: {}", field, value, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MatchError::IoError(_) => "Check that the configuration file exists and is readable",
            MatchError::SerializationError(_) => "Report this as a bug",
            MatchError::PatternError(_) => "Report this as a bug",
            MatchError::ConfigValidationError { .. } => "Fix the configuration file and run again",
            MatchError::InvalidConfigValueError { .. } => {
                "Weights must be non-negative and thresholds must lie between 0 and 100"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
