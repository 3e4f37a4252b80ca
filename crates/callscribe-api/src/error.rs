//! Callscribe — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use callscribe_core::error::CallError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Body returned when a duplicate callback is acknowledged.
#[derive(Debug, Serialize)]
struct DuplicateAck {
    status: &'static str,
}

/// HTTP-layer wrapper around `CallError` that implements `IntoResponse`.
///
/// Provider callbacks and read queries disagree on two points: an unknown call
/// SID rejects a callback with 400, while a read of it is a plain 404; and a
/// duplicate callback is acknowledged with 200, while a duplicate anywhere
/// else is a 409.
#[derive(Debug)]
pub enum ApiError {
    /// Error while applying a provider callback.
    Callback(CallError),
    /// Error while serving a read query.
    Query(CallError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &CallError) {
        match self {
            Self::Query(err @ CallError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found", err),
            Self::Callback(err @ CallError::DuplicateEvent(_)) => {
                (StatusCode::OK, "duplicate", err)
            }
            Self::Query(err @ CallError::DuplicateEvent(_)) => {
                (StatusCode::CONFLICT, "duplicate_event", err)
            }
            Self::Callback(err) | Self::Query(err) => {
                let (status, code) = match err {
                    CallError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                    CallError::NotFound(_) => (StatusCode::BAD_REQUEST, "not_found"),
                    CallError::NoEffect(_) => (StatusCode::BAD_REQUEST, "no_effect"),
                    CallError::DuplicateEvent(_) => (StatusCode::CONFLICT, "duplicate_event"),
                    CallError::PersistenceFailure(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "persistence_failure")
                    }
                };
                (status, code, err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, err) = self.parts();

        if status.is_success() {
            return (status, Json(DuplicateAck { status: code })).into_response();
        }

        let body = ErrorBody {
            error: code,
            message: err.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
