//! Error types for lookupgen

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// lookupgen errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Unknown mapping rule: {0}")]
    UnknownRule(String),

    #[error("Mapping rule {rule} has no {kind} at index {index}")]
    MissingClause {
        rule: String,
        kind: &'static str,
        index: usize,
    },

    #[error("Mapping rule {0} is incomplete and cannot be applied")]
    IncompleteRule(String),

    #[error("Unit {unit} is not valid for parameter type {typ}")]
    InvalidUnit { typ: String, unit: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
