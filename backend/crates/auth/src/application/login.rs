//! Login Use Case
//!
//! Verifies email + password and issues a bearer token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::{access_token::AccessToken, user::User};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    /// Clear token, returned to the client exactly once
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to anyone
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = RawPassword::for_login(input.password);
        if !password.matches(&user.password_hash, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let (token, record) = AccessToken::issue(user.user_id, self.config.token_ttl_chrono());
        self.token_repo.insert_token(&record).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User logged in"
        );

        Ok(LoginOutput {
            token,
            expires_at: record.expires_at,
            user,
        })
    }
}
