//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::*;
pub use repository::{
    AccommodationRepository, BillingStore, PaymentRepository, RegistrationLookup,
    SponsorRepository,
};
pub use value_object::{AccommodationStatus, PaymentPurpose};
