//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::domain::entity::{access_token::AccessToken, user::{NewUser, User}};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; the database assigns the id
    async fn create_user(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;

    /// All users, optionally restricted to one role, ordered by id
    async fn list_users(&self, role: Option<UserRole>) -> AuthResult<Vec<User>>;
}

/// Bearer token repository trait
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    async fn insert_token(&self, token: &AccessToken) -> AuthResult<()>;

    /// Join `tokens` to `users`; only unexpired tokens match
    async fn find_principal_by_token(&self, token_hash: &str) -> AuthResult<Option<Principal>>;

    async fn delete_token(&self, token_hash: &str) -> AuthResult<()>;

    /// Remove expired tokens, returning how many were deleted
    async fn cleanup_expired_tokens(&self) -> AuthResult<u64>;
}

/// Everything the auth handlers need from one store
pub trait AuthStore: UserRepository + TokenRepository + Clone + Send + Sync + 'static {}

impl<T> AuthStore for T where T: UserRepository + TokenRepository + Clone + Send + Sync + 'static {}
