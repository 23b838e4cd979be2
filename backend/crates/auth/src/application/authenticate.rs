//! Authenticate Use Case
//!
//! Resolves a clear bearer token to the [`Principal`] it was issued to.

use std::sync::Arc;

use kernel::principal::Principal;

use crate::domain::entity::access_token::AccessToken;
use crate::domain::repository::TokenRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// `TokenInvalid` for unknown and expired tokens alike.
    pub async fn execute(&self, token: &str) -> AuthResult<Principal> {
        self.token_repo
            .find_principal_by_token(&AccessToken::digest(token))
            .await?
            .ok_or(AuthError::TokenInvalid)
    }
}
