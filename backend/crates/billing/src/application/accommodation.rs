//! Accommodation requests
//!
//! A participant registered for an event asks for rooms; an admin accepts
//! (optionally noting room details) or rejects the request.

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::{AccommodationId, EventId};
use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::application::non_blank;
use crate::domain::entity::{Accommodation, NewAccommodation};
use crate::domain::repository::{AccommodationRepository, RegistrationLookup};
use crate::domain::value_object::AccommodationStatus;
use crate::error::{BillingError, BillingResult};

pub struct RequestAccommodationInput {
    pub event_id: EventId,
    pub people_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub notes: Option<String>,
}

pub struct RequestAccommodationUseCase<R>
where
    R: RegistrationLookup + AccommodationRepository,
{
    repo: Arc<R>,
}

impl<R> RequestAccommodationUseCase<R>
where
    R: RegistrationLookup + AccommodationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: RequestAccommodationInput,
    ) -> BillingResult<Accommodation> {
        if input.people_count < 1 {
            return Err(BillingError::Validation(
                "peopleCount must be at least 1".to_string(),
            ));
        }
        if input.check_out <= input.check_in {
            return Err(BillingError::Validation(
                "checkOut must be after checkIn".to_string(),
            ));
        }

        if !self.repo.event_exists(input.event_id).await? {
            return Err(BillingError::EventNotFound);
        }
        let team_id = self
            .repo
            .find_user_team(input.event_id, principal.user_id)
            .await?
            .ok_or(BillingError::NotRegistered)?;

        let accommodation = self
            .repo
            .create_accommodation(&NewAccommodation {
                user_id: principal.user_id,
                event_id: input.event_id,
                team_id: Some(team_id),
                people_count: input.people_count,
                check_in: input.check_in,
                check_out: input.check_out,
                notes: non_blank(input.notes),
            })
            .await?;

        tracing::info!(
            accommodation_id = %accommodation.accommodation_id,
            event_id = %input.event_id,
            user_id = %principal.user_id,
            "Accommodation requested"
        );

        Ok(accommodation)
    }
}

pub struct AccommodationQueriesUseCase<R>
where
    R: AccommodationRepository,
{
    repo: Arc<R>,
}

impl<R> AccommodationQueriesUseCase<R>
where
    R: AccommodationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn mine(&self, principal: &Principal) -> BillingResult<Vec<Accommodation>> {
        self.repo.list_user_accommodations(principal.user_id).await
    }

    /// Admin only. `status` is the raw query-string value.
    pub async fn all(
        &self,
        principal: &Principal,
        status: Option<&str>,
    ) -> BillingResult<Vec<Accommodation>> {
        principal.require_role(&[UserRole::Admin])?;
        let status = status
            .filter(|s| !s.trim().is_empty())
            .map(AccommodationStatus::parse_filter)
            .transpose()?;
        self.repo.list_accommodations(status).await
    }
}

pub struct ReviewAccommodationUseCase<R>
where
    R: AccommodationRepository,
{
    repo: Arc<R>,
}

impl<R> ReviewAccommodationUseCase<R>
where
    R: AccommodationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn accept(
        &self,
        principal: &Principal,
        accommodation_id: AccommodationId,
        room_details: Option<String>,
    ) -> BillingResult<Accommodation> {
        let room_details = non_blank(room_details);
        self.decide(
            principal,
            accommodation_id,
            AccommodationStatus::Accepted,
            room_details.as_deref(),
        )
        .await
    }

    pub async fn reject(
        &self,
        principal: &Principal,
        accommodation_id: AccommodationId,
    ) -> BillingResult<Accommodation> {
        self.decide(principal, accommodation_id, AccommodationStatus::Rejected, None)
            .await
    }

    async fn decide(
        &self,
        principal: &Principal,
        accommodation_id: AccommodationId,
        to: AccommodationStatus,
        room_details: Option<&str>,
    ) -> BillingResult<Accommodation> {
        principal.require_role(&[UserRole::Admin])?;

        let current = self
            .repo
            .find_accommodation(accommodation_id)
            .await?
            .ok_or(BillingError::AccommodationNotFound)?;
        if !current.status.can_transition_to(to) {
            return Err(BillingError::InvalidTransition(current.status));
        }

        let updated = self
            .repo
            .decide_accommodation(accommodation_id, to, room_details)
            .await?
            .ok_or(BillingError::InvalidTransition(to))?;

        tracing::info!(
            accommodation_id = %accommodation_id,
            status = %to,
            reviewed_by = %principal.user_id,
            "Accommodation reviewed"
        );

        Ok(updated)
    }
}
