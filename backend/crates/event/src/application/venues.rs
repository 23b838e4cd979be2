//! Venue use cases

use std::sync::Arc;

use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::application::required;
use crate::domain::entity::{NewVenue, Venue};
use crate::domain::repository::VenueRepository;
use crate::error::{EventError, EventResult};

pub struct CreateVenueInput {
    pub name: String,
    pub location: String,
    pub capacity: i32,
}

pub struct CreateVenueUseCase<R>
where
    R: VenueRepository,
{
    repo: Arc<R>,
}

impl<R> CreateVenueUseCase<R>
where
    R: VenueRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal, input: CreateVenueInput) -> EventResult<Venue> {
        principal.require_role(&[UserRole::Admin])?;

        let venue = NewVenue {
            name: required(&input.name, "name")?,
            location: required(&input.location, "location")?,
            capacity: input.capacity,
        };
        if venue.capacity <= 0 {
            return Err(EventError::Validation(
                "capacity must be greater than 0".to_string(),
            ));
        }

        let venue = self.repo.create_venue(&venue).await?;
        tracing::info!(venue_id = %venue.venue_id, "Venue created");
        Ok(venue)
    }
}

pub struct ListVenuesUseCase<R>
where
    R: VenueRepository,
{
    repo: Arc<R>,
}

impl<R> ListVenuesUseCase<R>
where
    R: VenueRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> EventResult<Vec<Venue>> {
        self.repo.list_venues().await
    }
}
