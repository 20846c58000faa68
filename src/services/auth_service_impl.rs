//! `SeaORM` implementation of [`AuthService`] and [`SessionResolver`].

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::UserIdentity;
use crate::services::auth_service::{
    AuthError, AuthService, Credentials, LoginResult, SessionResolver, UserInfo,
};
use async_trait::async_trait;

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(LoginResult {
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo {
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "New password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let is_valid = self
            .store
            .verify_user_password(username, current_password)
            .await?;

        if !is_valid {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store
            .update_user_password(username, new_password, &self.security)
            .await?;

        Ok(())
    }

    async fn regenerate_api_key(&self, username: &str) -> Result<String, AuthError> {
        Ok(self.store.regenerate_user_api_key(username).await?)
    }
}

#[async_trait]
impl SessionResolver for SeaOrmAuthService {
    async fn resolve(&self, credentials: &Credentials) -> Result<Option<UserIdentity>, AuthError> {
        // Session first; a session for a since-deleted user falls through to the key.
        if let Some(username) = &credentials.session_user
            && let Some(user) = self.store.get_user_by_username(username).await?
        {
            return Ok(Some(UserIdentity {
                id: user.id,
                username: user.username,
            }));
        }

        if let Some(key) = &credentials.api_key
            && let Some(user) = self.store.verify_api_key(key).await?
        {
            return Ok(Some(UserIdentity {
                id: user.id,
                username: user.username,
            }));
        }

        Ok(None)
    }
}
