use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finproj_core::ConfigError;
use serde_json::json;

/// Custom error types for the projection API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedBody(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Config(_) | ApiError::MalformedBody(_) | ApiError::InvalidRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Config(err) => err.code(),
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::InvalidRequest { .. } => "invalid_request",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            ApiError::Config(err) => Some(err.field()),
            ApiError::InvalidRequest { field, .. } => Some(field.clone()),
            ApiError::MalformedBody(_) | ApiError::Internal(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "Internal server error".to_string()
            }
            ApiError::Config(err) => {
                tracing::debug!(code = err.code(), "rejected projection input: {err}");
                err.to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "field": self.field(),
                "message": message,
            }
        }));

        (self.status(), body).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
