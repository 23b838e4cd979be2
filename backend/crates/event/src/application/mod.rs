//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod events;
pub mod judging;
pub mod registration;
pub mod results;
pub mod rounds;
pub mod venues;

pub use config::EventConfig;
pub use events::{
    CreateEventInput, CreateEventUseCase, EventQueriesUseCase, ReviewEventUseCase,
};
pub use judging::{AssignJudgeUseCase, JudgedEventsUseCase, MarkScoreInput, MarkScoreUseCase};
pub use registration::{
    EventParticipantsUseCase, MyRegistrationsUseCase, RegisterTeamInput, RegisterTeamOutput,
    RegisterTeamUseCase, TeamRoster,
};
pub use results::{EventResults, EventResultsUseCase, TeamResult};
pub use rounds::{AddRoundInput, AddRoundUseCase, ListRoundsUseCase};
pub use venues::{CreateVenueInput, CreateVenueUseCase, ListVenuesUseCase};

/// Trim, and turn blank into `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trimmed, required text field.
pub(crate) fn required(value: &str, field: &str) -> crate::error::EventResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(crate::error::EventError::Validation(format!(
            "{} is required",
            field
        )));
    }
    Ok(value.to_owned())
}
