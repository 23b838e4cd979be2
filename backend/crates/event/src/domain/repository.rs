//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{EventId, ParticipantId, RoundId, ScoreId, UserId, VenueId};
use kernel::team::TeamId;

use crate::domain::entity::*;
use crate::domain::value_object::EventStatus;
use crate::error::EventResult;

#[trait_variant::make(VenueRepository: Send)]
pub trait LocalVenueRepository {
    async fn create_venue(&self, venue: &NewVenue) -> EventResult<Venue>;

    async fn find_venue(&self, venue_id: VenueId) -> EventResult<Option<Venue>>;

    async fn list_venues(&self) -> EventResult<Vec<Venue>>;
}

#[trait_variant::make(EventRepository: Send)]
pub trait LocalEventRepository {
    async fn create_event(&self, event: &NewEvent) -> EventResult<Event>;

    async fn find_event(&self, event_id: EventId) -> EventResult<Option<Event>>;

    /// Events in one status, optionally one category, ordered by date
    async fn list_events(
        &self,
        status: EventStatus,
        category: Option<&str>,
    ) -> EventResult<Vec<Event>>;

    async fn list_events_by_organizer(&self, organizer_id: UserId) -> EventResult<Vec<Event>>;

    /// Compare-and-set on `status`. `None` when the event was not in `from`.
    async fn update_event_status(
        &self,
        event_id: EventId,
        from: EventStatus,
        to: EventStatus,
        reason: Option<&str>,
    ) -> EventResult<Option<Event>>;
}

#[trait_variant::make(RoundRepository: Send)]
pub trait LocalRoundRepository {
    /// Insert with the next free round number of the event
    async fn create_round(&self, round: &NewRound) -> EventResult<Round>;

    async fn find_round(&self, round_id: RoundId) -> EventResult<Option<Round>>;

    async fn list_rounds(&self, event_id: EventId) -> EventResult<Vec<Round>>;
}

/// Read-only view of `users` for team forming and judge assignment
#[trait_variant::make(MemberDirectory: Send)]
pub trait LocalMemberDirectory {
    /// Lower-cased emails in, matching users out (unknown emails are absent)
    async fn find_members_by_emails(&self, emails: &[String]) -> EventResult<Vec<Member>>;

    async fn find_member(&self, user_id: UserId) -> EventResult<Option<Member>>;
}

#[trait_variant::make(RegistrationRepository: Send)]
pub trait LocalRegistrationRepository {
    /// The subset of `user_ids` already registered for the event
    async fn find_registered_users(
        &self,
        event_id: EventId,
        user_ids: &[UserId],
    ) -> EventResult<Vec<UserId>>;

    /// Atomically check remaining capacity and insert one row per member.
    ///
    /// Fails with `EventFull` when the team does not fit and with
    /// `AlreadyRegistered` when a member raced in first.
    async fn register_team(&self, registration: &NewRegistration)
    -> EventResult<Vec<ParticipantId>>;

    async fn team_exists(&self, event_id: EventId, team_id: &TeamId) -> EventResult<bool>;

    /// Ordered by team, then registration
    async fn list_participants(&self, event_id: EventId) -> EventResult<Vec<ParticipantEntry>>;

    async fn list_user_registrations(&self, user_id: UserId)
    -> EventResult<Vec<UserRegistration>>;
}

#[trait_variant::make(JudgeRepository: Send)]
pub trait LocalJudgeRepository {
    /// Fails with `JudgeAlreadyAssigned` on a duplicate
    async fn assign_judge(&self, event_id: EventId, user_id: UserId)
    -> EventResult<JudgeAssignment>;

    async fn is_assigned_judge(&self, event_id: EventId, user_id: UserId) -> EventResult<bool>;

    async fn list_judged_events(&self, user_id: UserId) -> EventResult<Vec<Event>>;
}

#[trait_variant::make(ScoreRepository: Send)]
pub trait LocalScoreRepository {
    /// Fails with `DuplicateScore` when the judge already scored the team in the round
    async fn insert_score(&self, score: &NewScore) -> EventResult<ScoreId>;

    async fn list_event_scores(&self, event_id: EventId) -> EventResult<Vec<ScoreEntry>>;
}

/// Everything the event handlers need from one store
pub trait EventStore:
    VenueRepository
    + EventRepository
    + RoundRepository
    + MemberDirectory
    + RegistrationRepository
    + JudgeRepository
    + ScoreRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> EventStore for T where
    T: VenueRepository
        + EventRepository
        + RoundRepository
        + MemberDirectory
        + RegistrationRepository
        + JudgeRepository
        + ScoreRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
