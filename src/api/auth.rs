use axum::{
    Json,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{HeaderMap, request::Parts},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, MessageResponse};
use crate::domain::UserIdentity;
use crate::services::{Credentials, LoginResult, UserInfo};

const SESSION_USER_KEY: &str = "user";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
}

// ============================================================================
// Extractor
// ============================================================================

/// The identity behind the current request.
///
/// Resolution checks, through the configured [`crate::services::SessionResolver`]:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
///
/// Anonymous requests are rejected with 401 before any later extractor (and
/// so before the handler body) runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserIdentity);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_user = match Session::from_request_parts(parts, state).await {
            Ok(session) => session
                .get::<String>(SESSION_USER_KEY)
                .await
                .map_err(|e| ApiError::internal(format!("Session error: {e}")))?,
            Err(_) => None,
        };

        let credentials = Credentials {
            session_user,
            api_key: extract_api_key(&parts.headers),
        };

        let identity = state
            .session_resolver()
            .resolve(&credentials)
            .await
            .map_err(|e| ApiError::store_failure("Failed to resolve session", e))?
            .ok_or_else(ApiError::unauthorized)?;

        tracing::Span::current().record("user_id", identity.username.as_str());

        Ok(Self(identity))
    }
}

/// Extract API key from headers
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with username and password, returns API key on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResult>, ApiError> {
    let Json(payload) = payload?;

    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, &result.username)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(user = %result.username, "User logged in");

    Ok(Json(result))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Json<MessageResponse> {
    let _ = session.flush().await;
    Json(MessageResponse::new("Logged out"))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserInfo>, ApiError> {
    let info = state.auth_service().get_user_info(&user.username).await?;
    Ok(Json(info))
}

/// PUT /auth/password
/// Change password (requires current password verification)
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;

    state
        .auth_service()
        .change_password(
            &user.username,
            &payload.current_password,
            &payload.new_password,
        )
        .await?;

    tracing::info!("Password changed for user: {}", user.username);

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// POST /auth/api-key/regenerate
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let api_key = state
        .auth_service()
        .regenerate_api_key(&user.username)
        .await?;

    tracing::info!("API key regenerated for user: {}", user.username);

    Ok(Json(ApiKeyResponse { api_key }))
}
