//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Registration with a self-chosen role (anything but admin)
//! - Email + password login issuing an opaque bearer token
//! - Logout revokes the presented token
//! - Admin user directory, filterable by role
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens are 256-bit random values; only their SHA-256 is stored
//! - Tokens expire after `AuthConfig::token_ttl`
//! - Role checks compare the `users.role` string via `kernel::role::UserRole`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, MAX_TOKEN_TTL_HOURS};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthMiddlewareState, resolve_principal};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::{access_token::AccessToken, user::{NewUser, User}};
    pub use crate::domain::value_object::{
        contact::Contact, email::Email, person_name::PersonName,
    };
    pub use crate::presentation::dto::*;
}
