//! Event Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, ranking
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Venues (admin managed)
//! - Events created by organizers, approved or rejected by admins
//! - Numbered rounds per event
//! - Team registration: one generated team id shared by every member row
//! - Judge assignment, per-round scoring and ranked results
//!
//! ## Concurrency
//! Team registration re-counts participants inside a transaction that
//! holds `SELECT ... FOR UPDATE` on the event row, so two teams cannot
//! both take the last seats.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::EventConfig;
pub use error::{EventError, EventResult};
pub use infra::postgres::PgEventRepository;
pub use presentation::router::{event_router, event_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::EventStatus;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
