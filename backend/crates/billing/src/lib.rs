//! Billing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Accommodation requests by registered participants, reviewed by admins
//! - Sponsor profiles, sponsorship packages and sponsorships
//! - Payment submission for event fees, accommodation and sponsorships
//! - Manual payment verification by admins
//!
//! ## Payments
//! There is no gateway. A user records a transfer reference and an admin
//! verifies it after checking the transfer out of band. Verification marks
//! the paid-for rows in the same transaction.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BillingConfig;
pub use error::{BillingError, BillingResult};
pub use infra::postgres::PgBillingRepository;
pub use presentation::router::{billing_router, billing_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::{AccommodationStatus, PaymentPurpose};
    pub use crate::presentation::dto::*;
}
