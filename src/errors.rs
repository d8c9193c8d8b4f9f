//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. The error
//! enum doubles as the HTTP error surface: the `IntoResponse` impl maps each
//! variant to a status code and a JSON body, so handlers can use `?` all the
//! way down into `core`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Unified application error.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing env var, bad config file, missing
    /// provider credentials).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what is misconfigured
        message: String,
    },

    /// Client-supplied input failed validation before any data access.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A monetary amount was zero, negative, or not finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No active session, or the session token is unknown/expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// A row the caller referenced does not exist or is not theirs.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "category"
        entity: &'static str,
        /// Identifier the caller supplied
        id: String,
    },

    /// The upstream messaging provider rejected the send.
    #[error("Provider error (status {status}): {detail}")]
    Provider {
        /// HTTP status returned by the provider
        status: u16,
        /// Provider-supplied error detail, passed through verbatim
        detail: String,
    },

    /// Database failure from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Outbound HTTP failure talking to the messaging provider.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (config file reads, socket binding).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status code this error maps to on the HTTP surface.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            // Pass the provider's own status through to the caller.
            Self::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
