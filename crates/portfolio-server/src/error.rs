//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use portfolio_engine::EngineError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Market data unavailable: {0}")]
    MarketUnavailable(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Engine(EngineError::InvalidPosition(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_POSITION")
            }
            Self::Engine(EngineError::PositionNotFound(_)) => {
                (StatusCode::NOT_FOUND, "POSITION_NOT_FOUND")
            }
            Self::Engine(EngineError::Storage(_) | EngineError::Io(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_ERROR")
            }
            Self::Engine(EngineError::MarketData(_) | EngineError::Network(_))
            | Self::MarketUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "MARKET_UNAVAILABLE"),
            Self::Engine(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let error = match &self {
            Self::Engine(e) => e.user_message(),
            Self::MarketUnavailable(msg) => msg.clone(),
        };

        (
            status,
            Json(ErrorResponse {
                error,
                code: code.into(),
            }),
        )
            .into_response()
    }
}
