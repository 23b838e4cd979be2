//! Judge assignment and scoring

use std::sync::Arc;

use kernel::id::{EventId, RoundId, ScoreId, UserId};
use kernel::principal::Principal;
use kernel::role::UserRole;
use kernel::team::TeamId;

use crate::application::config::EventConfig;
use crate::application::non_blank;
use crate::domain::entity::{Event, JudgeAssignment, NewScore};
use crate::domain::repository::{
    EventRepository, JudgeRepository, MemberDirectory, RegistrationRepository, RoundRepository,
    ScoreRepository,
};
use crate::error::{EventError, EventResult};

pub struct AssignJudgeUseCase<R>
where
    R: EventRepository + MemberDirectory + JudgeRepository,
{
    repo: Arc<R>,
}

impl<R> AssignJudgeUseCase<R>
where
    R: EventRepository + MemberDirectory + JudgeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        event_id: EventId,
        user_id: UserId,
    ) -> EventResult<JudgeAssignment> {
        principal.require_role(&[UserRole::Admin])?;

        if self.repo.find_event(event_id).await?.is_none() {
            return Err(EventError::EventNotFound);
        }
        let member = self
            .repo
            .find_member(user_id)
            .await?
            .ok_or(EventError::UserNotFound)?;
        if member.role != UserRole::Judge {
            return Err(EventError::NotJudgeRole);
        }
        if self.repo.is_assigned_judge(event_id, user_id).await? {
            return Err(EventError::JudgeAlreadyAssigned);
        }

        let assignment = self.repo.assign_judge(event_id, user_id).await?;
        tracing::info!(
            event_id = %event_id,
            judge_user_id = %user_id,
            "Judge assigned"
        );
        Ok(assignment)
    }
}

pub struct JudgedEventsUseCase<R>
where
    R: JudgeRepository,
{
    repo: Arc<R>,
}

impl<R> JudgedEventsUseCase<R>
where
    R: JudgeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal) -> EventResult<Vec<Event>> {
        principal.require_role(&[UserRole::Judge])?;
        self.repo.list_judged_events(principal.user_id).await
    }
}

pub struct MarkScoreInput {
    pub round_id: RoundId,
    pub team_id: String,
    pub score: i32,
    pub remarks: Option<String>,
}

pub struct MarkScoreUseCase<R>
where
    R: RoundRepository + JudgeRepository + RegistrationRepository + ScoreRepository,
{
    repo: Arc<R>,
    config: Arc<EventConfig>,
}

impl<R> MarkScoreUseCase<R>
where
    R: RoundRepository + JudgeRepository + RegistrationRepository + ScoreRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<EventConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, principal: &Principal, input: MarkScoreInput) -> EventResult<ScoreId> {
        principal.require_role(&[UserRole::Judge])?;

        let round = self
            .repo
            .find_round(input.round_id)
            .await?
            .ok_or(EventError::RoundNotFound)?;
        if !self
            .repo
            .is_assigned_judge(round.event_id, principal.user_id)
            .await?
        {
            return Err(EventError::NotAssignedJudge);
        }

        let team_id = TeamId::parse_str(&input.team_id)?;
        if !self.repo.team_exists(round.event_id, &team_id).await? {
            return Err(EventError::TeamNotRegistered);
        }
        if !self.config.score_in_range(input.score) {
            return Err(EventError::ScoreOutOfRange {
                min: self.config.min_score,
                max: self.config.max_score,
            });
        }

        let score_id = self
            .repo
            .insert_score(&NewScore {
                round_id: round.round_id,
                judge_user_id: principal.user_id,
                team_id,
                points: input.score,
                remarks: non_blank(input.remarks),
            })
            .await?;

        tracing::info!(
            round_id = %round.round_id,
            team_id = %team_id,
            judge_user_id = %principal.user_id,
            points = input.score,
            "Score recorded"
        );

        Ok(score_id)
    }
}
