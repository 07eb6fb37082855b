use crate::key::KeyError;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Key: {0}")]
    Key(#[from] KeyError),

    #[error("Resource Exhaustion: {0}")]
    ResourceExhaustion(#[from] TryReserveError),

    #[error("Key size range {min}..={max} is not searchable (allowed: 1..={limit})")]
    KeyRange { min: usize, max: usize, limit: usize },

    #[error("Output buffer holds {capacity} bytes but {needed} are required")]
    BufferTooSmall { needed: usize, capacity: usize },

    #[error("Key size must be at least 1")]
    ZeroKeySize,

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Buffer Error: {0}")]
    Buffer(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type CrackResult<T> = Result<T, CrackError>;
