//! User queries
//!
//! Profile of the caller and the admin-facing user directory.

use std::sync::Arc;

use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, principal: &Principal) -> AuthResult<User> {
        self.user_repo
            .find_user_by_id(principal.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Admin only. `role` is the raw query-string value.
    pub async fn execute(&self, principal: &Principal, role: Option<&str>) -> AuthResult<Vec<User>> {
        principal.require_role(&[UserRole::Admin])?;

        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::parse::<UserRole>)
            .transpose()?;

        self.user_repo.list_users(role).await
    }
}
