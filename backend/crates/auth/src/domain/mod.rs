//! Domain Layer
//!
//! Entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{access_token::AccessToken, user::{NewUser, User}};
pub use repository::{AuthStore, TokenRepository, UserRepository};
