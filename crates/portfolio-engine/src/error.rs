//! Error Types for the Portfolio Engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Position not found: {0}")]
    PositionNotFound(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Check if retrying the operation could succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MarketData(_) | Self::Network(_) | Self::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidPosition(msg) => format!("Invalid position: {msg}"),
            Self::PositionNotFound(id) => format!("No holding for '{id}' in the portfolio."),
            Self::MarketData(_) | Self::Network(_) => {
                "Unable to sync with live market data. Retry in a few moments.".into()
            }
            Self::Storage(_) | Self::Io(_) => "The portfolio could not be saved or loaded.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(EngineError::MarketData("503".into()).is_retryable());
        assert!(!EngineError::InvalidPosition("quantity".into()).is_retryable());
    }

    #[test]
    fn test_user_message_names_missing_holding() {
        let err = EngineError::PositionNotFound("bitcoin".into());
        assert!(err.user_message().contains("bitcoin"));
    }
}
