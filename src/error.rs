use thiserror::Error;

use crate::gateway::GatewayError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("user input exceeds {limit} characters")]
    InputTooLong { limit: usize },

    #[error("reached the limit of {limit} tool rounds without a final reply")]
    RoundLimitExceeded { limit: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("model gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
