//! Domain Layer

pub mod entity;
pub mod ranking;
pub mod repository;
pub mod value_object;

pub use entity::*;
pub use repository::{
    EventRepository, EventStore, JudgeRepository, MemberDirectory, RegistrationRepository,
    RoundRepository, ScoreRepository, VenueRepository,
};
pub use value_object::EventStatus;
