//! Event use cases
//!
//! Creation by organizers, public browsing, and the admin approval
//! workflow (`pending -> approved | rejected`).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{EventId, VenueId};
use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::application::config::EventConfig;
use crate::application::{non_blank, required};
use crate::domain::entity::{Event, NewEvent};
use crate::domain::repository::{EventRepository, VenueRepository};
use crate::domain::value_object::EventStatus;
use crate::error::{EventError, EventResult};

// ============================================================================
// Create
// ============================================================================

pub struct CreateEventInput {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub rules: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue_id: Option<VenueId>,
    pub registration_fee: i64,
    pub max_participants: i32,
    pub max_team_size: Option<i32>,
}

pub struct CreateEventUseCase<R>
where
    R: EventRepository + VenueRepository,
{
    repo: Arc<R>,
    config: Arc<EventConfig>,
}

impl<R> CreateEventUseCase<R>
where
    R: EventRepository + VenueRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<EventConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, principal: &Principal, input: CreateEventInput) -> EventResult<Event> {
        principal.require_role(&[UserRole::Organizer, UserRole::Admin])?;

        let name = required(&input.name, "name")?;
        let category = required(&input.category, "category")?;

        if input.max_participants <= 0 {
            return Err(EventError::Validation(
                "maxParticipants must be greater than 0".to_string(),
            ));
        }
        let max_team_size = input.max_team_size.unwrap_or(self.config.default_team_size);
        if max_team_size < 1 || max_team_size > input.max_participants {
            return Err(EventError::Validation(
                "maxTeamSize must be between 1 and maxParticipants".to_string(),
            ));
        }
        if input.registration_fee < 0 {
            return Err(EventError::Validation(
                "registrationFee cannot be negative".to_string(),
            ));
        }

        if let Some(venue_id) = input.venue_id {
            let venue = self
                .repo
                .find_venue(venue_id)
                .await?
                .ok_or(EventError::VenueNotFound)?;
            if input.max_participants > venue.capacity {
                return Err(EventError::Validation(format!(
                    "maxParticipants exceeds the venue capacity of {}",
                    venue.capacity
                )));
            }
        }

        let event = self
            .repo
            .create_event(&NewEvent {
                organizer_id: principal.user_id,
                venue_id: input.venue_id,
                name,
                description: non_blank(input.description),
                category,
                rules: non_blank(input.rules),
                event_date: input.event_date,
                registration_fee: input.registration_fee,
                max_participants: input.max_participants,
                max_team_size,
            })
            .await?;

        tracing::info!(
            event_id = %event.event_id,
            organizer_id = %principal.user_id,
            "Event submitted for approval"
        );

        Ok(event)
    }
}

// ============================================================================
// Queries
// ============================================================================

pub struct EventQueriesUseCase<R>
where
    R: EventRepository,
{
    repo: Arc<R>,
}

impl<R> EventQueriesUseCase<R>
where
    R: EventRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public catalogue: approved events only.
    pub async fn list_approved(&self, category: Option<&str>) -> EventResult<Vec<Event>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        self.repo.list_events(EventStatus::Approved, category).await
    }

    pub async fn get(&self, event_id: EventId) -> EventResult<Event> {
        self.repo
            .find_event(event_id)
            .await?
            .ok_or(EventError::EventNotFound)
    }

    pub async fn organized_by(&self, principal: &Principal) -> EventResult<Vec<Event>> {
        principal.require_role(&[UserRole::Organizer, UserRole::Admin])?;
        self.repo.list_events_by_organizer(principal.user_id).await
    }

    pub async fn pending(&self, principal: &Principal) -> EventResult<Vec<Event>> {
        principal.require_role(&[UserRole::Admin])?;
        self.repo.list_events(EventStatus::Pending, None).await
    }
}

// ============================================================================
// Review
// ============================================================================

pub struct ReviewEventUseCase<R>
where
    R: EventRepository,
{
    repo: Arc<R>,
}

impl<R> ReviewEventUseCase<R>
where
    R: EventRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn accept(&self, principal: &Principal, event_id: EventId) -> EventResult<Event> {
        self.transition(principal, event_id, EventStatus::Approved, None)
            .await
    }

    pub async fn reject(
        &self,
        principal: &Principal,
        event_id: EventId,
        reason: Option<String>,
    ) -> EventResult<Event> {
        let reason = non_blank(reason);
        self.transition(principal, event_id, EventStatus::Rejected, reason.as_deref())
            .await
    }

    async fn transition(
        &self,
        principal: &Principal,
        event_id: EventId,
        to: EventStatus,
        reason: Option<&str>,
    ) -> EventResult<Event> {
        principal.require_role(&[UserRole::Admin])?;

        let current = self
            .repo
            .find_event(event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;
        if !current.status.can_transition_to(to) {
            return Err(EventError::InvalidTransition(current.status));
        }

        // Another admin may have decided in between.
        let updated = self
            .repo
            .update_event_status(event_id, current.status, to, reason)
            .await?;
        let event = match updated {
            Some(event) => event,
            None => {
                let status = self
                    .repo
                    .find_event(event_id)
                    .await?
                    .map(|e| e.status)
                    .unwrap_or(to);
                return Err(EventError::InvalidTransition(status));
            }
        };

        tracing::info!(
            event_id = %event_id,
            status = %to,
            reviewed_by = %principal.user_id,
            "Event reviewed"
        );

        Ok(event)
    }
}
