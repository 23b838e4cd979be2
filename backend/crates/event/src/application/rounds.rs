//! Round use cases

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::EventId;
use kernel::principal::Principal;

use crate::application::required;
use crate::domain::entity::{NewRound, Round};
use crate::domain::repository::{EventRepository, RoundRepository};
use crate::error::{EventError, EventResult};

pub struct AddRoundInput {
    pub event_id: EventId,
    pub name: String,
    pub round_date: Option<DateTime<Utc>>,
}

pub struct AddRoundUseCase<R>
where
    R: EventRepository + RoundRepository,
{
    repo: Arc<R>,
}

impl<R> AddRoundUseCase<R>
where
    R: EventRepository + RoundRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal, input: AddRoundInput) -> EventResult<Round> {
        let event = self
            .repo
            .find_event(input.event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;
        event.ensure_manager(principal)?;

        let round = self
            .repo
            .create_round(&NewRound {
                event_id: event.event_id,
                name: required(&input.name, "name")?,
                round_date: input.round_date,
            })
            .await?;

        tracing::info!(
            event_id = %round.event_id,
            round_id = %round.round_id,
            round_number = round.round_number,
            "Round added"
        );

        Ok(round)
    }
}

pub struct ListRoundsUseCase<R>
where
    R: EventRepository + RoundRepository,
{
    repo: Arc<R>,
}

impl<R> ListRoundsUseCase<R>
where
    R: EventRepository + RoundRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, event_id: EventId) -> EventResult<Vec<Round>> {
        if self.repo.find_event(event_id).await?.is_none() {
            return Err(EventError::EventNotFound);
        }
        self.repo.list_rounds(event_id).await
    }
}
