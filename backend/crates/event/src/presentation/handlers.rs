//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use kernel::extract::{AppJson, AppPath, AppQuery};
use kernel::id::EventId;
use kernel::principal::Principal;

use crate::application::config::EventConfig;
use crate::application::*;
use crate::domain::repository::EventStore;
use crate::error::EventResult;
use crate::presentation::dto::*;

/// Shared state for event handlers
#[derive(Clone)]
pub struct EventAppState<R>
where
    R: EventStore,
{
    pub repo: Arc<R>,
    pub config: Arc<EventConfig>,
}

// ============================================================================
// Venues
// ============================================================================

/// POST /venue
pub async fn create_venue<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<CreateVenueRequest>,
) -> EventResult<(StatusCode, Json<VenueCreatedResponse>)>
where
    R: EventStore,
{
    let venue = CreateVenueUseCase::new(state.repo.clone())
        .execute(
            &principal,
            CreateVenueInput {
                name: req.name,
                location: req.location,
                capacity: req.capacity,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VenueCreatedResponse {
            venue_id: venue.venue_id,
        }),
    ))
}

/// GET /venues
pub async fn list_venues<R>(
    State(state): State<EventAppState<R>>,
) -> EventResult<Json<Vec<VenueResponse>>>
where
    R: EventStore,
{
    let venues = ListVenuesUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(venues.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Events
// ============================================================================

/// GET /events?category=
pub async fn list_events<R>(
    State(state): State<EventAppState<R>>,
    AppQuery(query): AppQuery<EventListQuery>,
) -> EventResult<Json<Vec<EventResponse>>>
where
    R: EventStore,
{
    let events = EventQueriesUseCase::new(state.repo.clone())
        .list_approved(query.category.as_deref())
        .await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// GET /event/{id}
pub async fn get_event<R>(
    State(state): State<EventAppState<R>>,
    AppPath(event_id): AppPath<EventId>,
) -> EventResult<Json<EventResponse>>
where
    R: EventStore,
{
    let event = EventQueriesUseCase::new(state.repo.clone())
        .get(event_id)
        .await?;
    Ok(Json(event.into()))
}

/// POST /event
pub async fn create_event<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<CreateEventRequest>,
) -> EventResult<(StatusCode, Json<EventCreatedResponse>)>
where
    R: EventStore,
{
    let event = CreateEventUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &principal,
            CreateEventInput {
                name: req.name,
                description: req.description,
                category: req.category,
                rules: req.rules,
                event_date: req.event_date,
                venue_id: req.venue_id,
                registration_fee: req.registration_fee,
                max_participants: req.max_participants,
                max_team_size: req.max_team_size,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EventCreatedResponse {
            event_id: event.event_id,
        }),
    ))
}

/// GET /my-events
pub async fn my_events<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
) -> EventResult<Json<Vec<EventResponse>>>
where
    R: EventStore,
{
    let events = EventQueriesUseCase::new(state.repo.clone())
        .organized_by(&principal)
        .await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// GET /admin/events/pending
pub async fn pending_events<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
) -> EventResult<Json<Vec<EventResponse>>>
where
    R: EventStore,
{
    let events = EventQueriesUseCase::new(state.repo.clone())
        .pending(&principal)
        .await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /event/accept/{id}
pub async fn accept_event<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppPath(event_id): AppPath<EventId>,
) -> EventResult<Json<EventResponse>>
where
    R: EventStore,
{
    let event = ReviewEventUseCase::new(state.repo.clone())
        .accept(&principal, event_id)
        .await?;
    Ok(Json(event.into()))
}

/// PUT /event/{id}/reject
pub async fn reject_event<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppPath(event_id): AppPath<EventId>,
    body: Option<AppJson<RejectEventRequest>>,
) -> EventResult<Json<EventResponse>>
where
    R: EventStore,
{
    let reason = body.and_then(|AppJson(req)| req.reason);
    let event = ReviewEventUseCase::new(state.repo.clone())
        .reject(&principal, event_id, reason)
        .await?;
    Ok(Json(event.into()))
}

// ============================================================================
// Rounds
// ============================================================================

/// POST /event/{id}/round
pub async fn add_round<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppPath(event_id): AppPath<EventId>,
    AppJson(req): AppJson<CreateRoundRequest>,
) -> EventResult<(StatusCode, Json<RoundCreatedResponse>)>
where
    R: EventStore,
{
    let round = AddRoundUseCase::new(state.repo.clone())
        .execute(
            &principal,
            AddRoundInput {
                event_id,
                name: req.name,
                round_date: req.round_date,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RoundCreatedResponse {
            round_id: round.round_id,
            round_number: round.round_number,
        }),
    ))
}

/// GET /event/{id}/rounds
pub async fn list_rounds<R>(
    State(state): State<EventAppState<R>>,
    AppPath(event_id): AppPath<EventId>,
) -> EventResult<Json<Vec<RoundResponse>>>
where
    R: EventStore,
{
    let rounds = ListRoundsUseCase::new(state.repo.clone())
        .execute(event_id)
        .await?;
    Ok(Json(rounds.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Registration
// ============================================================================

/// POST /add-participants
pub async fn register_team<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<RegisterTeamRequest>,
) -> EventResult<(StatusCode, Json<RegisterTeamResponse>)>
where
    R: EventStore,
{
    let output = RegisterTeamUseCase::new(state.repo.clone())
        .execute(
            &principal,
            RegisterTeamInput {
                event_id: req.event_id,
                member_emails: req.member_emails,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterTeamResponse {
            team_id: output.team_id,
            participant_ids: output.participant_ids,
        }),
    ))
}

/// GET /my-registrations
pub async fn my_registrations<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
) -> EventResult<Json<Vec<RegistrationResponse>>>
where
    R: EventStore,
{
    let registrations = MyRegistrationsUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;
    Ok(Json(registrations.into_iter().map(Into::into).collect()))
}

/// GET /event/{id}/participants
pub async fn event_participants<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppPath(event_id): AppPath<EventId>,
) -> EventResult<Json<Vec<TeamRosterResponse>>>
where
    R: EventStore,
{
    let teams = EventParticipantsUseCase::new(state.repo.clone())
        .execute(&principal, event_id)
        .await?;
    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Judging
// ============================================================================

/// POST /admin/assign-judge
pub async fn assign_judge<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<AssignJudgeRequest>,
) -> EventResult<(StatusCode, Json<JudgeAssignedResponse>)>
where
    R: EventStore,
{
    let assignment = AssignJudgeUseCase::new(state.repo.clone())
        .execute(&principal, req.event_id, req.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JudgeAssignedResponse {
            judge_id: assignment.judge_id,
        }),
    ))
}

/// GET /judge/events
pub async fn judged_events<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
) -> EventResult<Json<Vec<EventResponse>>>
where
    R: EventStore,
{
    let events = JudgedEventsUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /judge/mark-score
pub async fn mark_score<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<MarkScoreRequest>,
) -> EventResult<(StatusCode, Json<ScoreCreatedResponse>)>
where
    R: EventStore,
{
    let score_id = MarkScoreUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &principal,
            MarkScoreInput {
                round_id: req.round_id,
                team_id: req.team_id,
                score: req.score,
                remarks: req.remarks,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ScoreCreatedResponse { score_id })))
}

/// GET /judge/event/{id}/results
pub async fn event_results<R>(
    State(state): State<EventAppState<R>>,
    principal: Principal,
    AppPath(event_id): AppPath<EventId>,
) -> EventResult<Json<ResultsResponse>>
where
    R: EventStore,
{
    let results = EventResultsUseCase::new(state.repo.clone())
        .execute(&principal, event_id)
        .await?;
    Ok(Json(results.into()))
}
