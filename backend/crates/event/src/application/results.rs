//! Ranked event results

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::EventId;
use kernel::principal::Principal;
use kernel::team::TeamId;

use crate::domain::ranking::rank_teams;
use crate::domain::repository::{EventRepository, RegistrationRepository, ScoreRepository};
use crate::error::{EventError, EventResult};

#[derive(Debug, Clone)]
pub struct TeamResult {
    pub rank: u32,
    pub team_id: TeamId,
    pub members: Vec<String>,
    pub average_score: f64,
    pub rounds_scored: u32,
}

#[derive(Debug, Clone)]
pub struct EventResults {
    pub event_id: EventId,
    pub event_name: String,
    pub results: Vec<TeamResult>,
}

pub struct EventResultsUseCase<R>
where
    R: EventRepository + RegistrationRepository + ScoreRepository,
{
    repo: Arc<R>,
}

impl<R> EventResultsUseCase<R>
where
    R: EventRepository + RegistrationRepository + ScoreRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Any signed-in user may view results. Unscored teams are left out.
    pub async fn execute(&self, _principal: &Principal, event_id: EventId) -> EventResult<EventResults> {
        let event = self
            .repo
            .find_event(event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;

        let scores = self.repo.list_event_scores(event_id).await?;
        let participants = self.repo.list_participants(event_id).await?;

        let mut names: HashMap<TeamId, Vec<String>> = HashMap::new();
        for p in participants {
            names.entry(p.team_id).or_default().push(p.name);
        }

        let results = rank_teams(&scores)
            .into_iter()
            .map(|standing| TeamResult {
                rank: standing.rank,
                members: names.remove(&standing.team_id).unwrap_or_default(),
                team_id: standing.team_id,
                average_score: standing.average_score,
                rounds_scored: standing.rounds_scored,
            })
            .collect();

        Ok(EventResults {
            event_id: event.event_id,
            event_name: event.name,
            results,
        })
    }
}
