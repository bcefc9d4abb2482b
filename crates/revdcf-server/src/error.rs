//! Server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use revdcf_core::ValuationError;

/// Errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration file could not be read, or the listener could not bind.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`ServerConfig`](crate::ServerConfig).
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The solver settings are out of range.
    #[error("Invalid solver settings: {0}")]
    Solver(#[from] ValuationError),

    /// A page template failed to compile.
    #[error("Template error: {0}")]
    Template(String),
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing a field or has one that is not a number.
    #[error("{0}")]
    BadRequest(String),

    /// The inputs are numbers but do not describe a valid valuation.
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// A page could not be rendered.
    #[error("Failed to render page: {0}")]
    Render(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Valuation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        ApiError::Render(err.to_string())
    }
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("request failed: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
