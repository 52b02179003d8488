// HTTP error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error with HTTP status code
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            error: self.message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Convert visitd_core errors to HTTP errors
impl From<visitd_core::Error> for AppError {
    fn from(err: visitd_core::Error) -> Self {
        use visitd_core::Error;

        match err {
            Error::StorageConnection(e) => {
                tracing::error!("Storage connection error: {}", e);
                Self::internal_server_error(format!("Failed to reach storage: {e}"))
            }
            Error::StorageQuery(e) => {
                tracing::error!("Storage query error: {}", e);
                Self::internal_server_error(format!("Storage operation failed: {e}"))
            }
            Error::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                Self::internal_server_error("Response encoding failed")
            }
            Error::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                Self::internal_server_error("Server misconfigured")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_500() {
        let err = AppError::from(visitd_core::Error::from(sqlx::Error::PoolClosed));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("storage"));
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = AppError::forbidden("Forbidden");
        assert_eq!(err.to_string(), "403 Forbidden: Forbidden");
    }
}
