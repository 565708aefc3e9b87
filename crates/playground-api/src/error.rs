//! Story playground — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use playground_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

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

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::NoStoriesInViewOnlyMode => {
                (StatusCode::CONFLICT, "no_stories_in_view_only_mode")
            }
            DomainError::StoryNotFound(_) => (StatusCode::NOT_FOUND, "story_not_found"),
            DomainError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            DomainError::DuplicateStory(_) => (StatusCode::CONFLICT, "duplicate_story"),
            DomainError::SessionTornDown(_) => (StatusCode::CONFLICT, "session_torn_down"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(reason) => {
                error!(%reason, "infrastructure failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use playground_core::story::StoryId;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_no_stories_in_view_only_mode_maps_to_409() {
        assert_eq!(
            status_of(DomainError::NoStoriesInViewOnlyMode),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_not_found_variants_map_to_404() {
        assert_eq!(
            status_of(DomainError::SessionNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::StoryNotFound(StoryId::from("a"))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_duplicate_story_maps_to_409() {
        assert_eq!(
            status_of(DomainError::DuplicateStory(StoryId::from("a"))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_session_torn_down_maps_to_409() {
        assert_eq!(
            status_of(DomainError::SessionTornDown(Uuid::new_v4())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("lock poisoned".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_config_message() {
        let err = AppError::Config("PORT must be a valid u16".into());
        assert_eq!(err.to_string(), "configuration error: PORT must be a valid u16");
    }
}
