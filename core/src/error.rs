/// Error types for the SOS contacts core
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SosError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid form: {0} must not be blank")]
    InvalidForm(&'static str),

    #[error("No contact id left after {0}")]
    IdsExhausted(i64),
}

pub type Result<T> = std::result::Result<T, SosError>;
