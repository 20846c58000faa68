use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::MessageResponse;
use crate::services::{AuthError, MovieError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Unauthorized(String),

    /// The persistence layer failed mid-request. `message` is what the
    /// caller sees; `cause` only reaches the logs.
    StoreFailure { message: String, cause: String },

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::StoreFailure { message, cause } => write!(f, "{message}: {cause}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::StoreFailure { message, cause } => {
                tracing::error!(error = %cause, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

/// Used by the read paths. Mutations map their own failures through
/// [`ApiError::store_failure`] so that a missing id is reported as a 500.
impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => Self::not_found("Movie", id),
            MovieError::Database(_) => Self::store_failure("Failed to load movies", err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials".to_string()),
            AuthError::UserNotFound => Self::Unauthorized("User not found".to_string()),
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Database(_) => Self::store_failure("Authentication error", err),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized("Authentication required".to_string())
    }

    pub fn store_failure(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::StoreFailure {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_store_failure_keeps_cause_out_of_body() {
        let (status, body) = render(ApiError::store_failure(
            "Failed to delete movie",
            "no such row",
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "Failed to delete movie" }));
    }

    #[tokio::test]
    async fn test_unauthorized_body_shape() {
        let (status, body) = render(ApiError::unauthorized()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_movie_error_mapping() {
        let (status, _) = render(MovieError::NotFound("abc".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = render(MovieError::Database("locked".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_auth_error_mapping() {
        let (status, _) = render(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = render(AuthError::Validation("too short".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "too short");
    }
}
