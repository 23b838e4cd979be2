//! Shared Kernel
//!
//! Vocabulary every NaSCon context agrees on:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed integer identifiers for the relational tables
//! - The team identifier stamped on participant, payment and score rows
//! - User roles and the authenticated [`principal::Principal`]
//! - Request extractors that reject malformed input as a 400 problem
//!
//! Nothing in here knows about a particular table layout or use case.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod principal;
pub mod role;
pub mod team;
