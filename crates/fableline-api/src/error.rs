//! Fableline — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fableline_core::error::GameError;
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

/// Errors for the JSON endpoints. The webhook routes never use this: they
/// always answer with a caller-facing TwiML script instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `DEBUG_AUTH_TOKEN` is not set, so the debug surface is disabled.
    #[error("debug endpoint not configured")]
    DebugNotConfigured,

    /// Missing or mismatching bearer token.
    #[error("unauthorized - authentication required")]
    Unauthorized,

    /// A domain error escaped to a JSON endpoint.
    #[error(transparent)]
    Game(#[from] GameError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::DebugNotConfigured => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Game(err) => match err {
                GameError::InvalidCallerId => (StatusCode::BAD_REQUEST, "invalid_caller_id"),
                GameError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
                GameError::UnknownStory(_) => (StatusCode::NOT_FOUND, "unknown_story"),
                GameError::UnknownNode(_) => (StatusCode::NOT_FOUND, "unknown_node"),
                GameError::SessionStore(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "session_store_error")
                }
                GameError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            },
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fableline_core::id::StoryId;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_not_configured_maps_to_503() {
        assert_eq!(
            status_of(ApiError::DebugNotConfigured),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_session_store_maps_to_500() {
        assert_eq!(
            status_of(ApiError::Game(GameError::SessionStore("db down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_story_maps_to_404() {
        assert_eq!(
            status_of(ApiError::Game(GameError::UnknownStory(StoryId::from(
                "missing"
            )))),
            StatusCode::NOT_FOUND
        );
    }
}
