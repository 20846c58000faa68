//! Domain service for authentication and session resolution.

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserIdentity;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub username: String,
    pub api_key: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    async fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the current password is wrong or
    /// the new one is too short or unchanged.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    async fn regenerate_api_key(&self, username: &str) -> Result<String, AuthError>;
}

/// What a request presents to prove who it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Username stored in the session cookie at login
    pub session_user: Option<String>,
    /// From `X-Api-Key` or `Authorization: Bearer`
    pub api_key: Option<String>,
}

/// Resolves the identity behind a request, if any.
///
/// Mutating endpoints depend on this capability instead of a global session
/// lookup; `Ok(None)` means the request is anonymous.
#[async_trait::async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> Result<Option<UserIdentity>, AuthError>;
}
