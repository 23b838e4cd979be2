//! Logout Use Case
//!
//! Revokes the bearer token the request was made with.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::access_token::AccessToken;
use crate::domain::repository::TokenRepository;
use crate::error::AuthResult;

pub struct LogoutUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    pub async fn execute(&self, user_id: UserId, token: &str) -> AuthResult<()> {
        self.token_repo
            .delete_token(&AccessToken::digest(token))
            .await?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
