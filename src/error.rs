//! Error types and handling for the roulette engine

use thiserror::Error;

/// Result type alias for roulette engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Roulette engine error types
///
/// Every variant is a local, recoverable failure handed back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bet type: {0}")]
    InvalidBetType(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid bet: {0}")]
    InvalidBet(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}
