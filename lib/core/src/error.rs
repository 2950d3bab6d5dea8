use crate::validation::ValidationResult;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {}", .0.error_summary())]
    Validation(ValidationResult),

    #[error("Transformation failed: {0}")]
    Transform(String),

    #[error("{0} format not implemented yet")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input record: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Findings behind a validation failure, if that is what this is
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Error::Validation(result) => Some(result),
            _ => None,
        }
    }
}
