//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{EventId, JudgeId, ParticipantId, RoundId, ScoreId, UserId, VenueId};
use kernel::team::TeamId;
use serde::{Deserialize, Serialize};

use crate::application::{EventResults, TeamResult, TeamRoster};
use crate::domain::entity::{Event, ParticipantEntry, Round, UserRegistration, Venue};
use crate::domain::value_object::EventStatus;

// ============================================================================
// Venues
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    pub name: String,
    pub location: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCreatedResponse {
    pub venue_id: VenueId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue_id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            venue_id: venue.venue_id,
            name: venue.name,
            location: venue.location,
            capacity: venue.capacity,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub rules: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue_id: Option<VenueId>,
    #[serde(default)]
    pub registration_fee: i64,
    pub max_participants: i32,
    pub max_team_size: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub event_id: EventId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectEventRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub organizer_id: UserId,
    pub venue_id: Option<VenueId>,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub rules: Option<String>,
    pub event_date: DateTime<Utc>,
    pub registration_fee: i64,
    pub max_participants: i32,
    pub max_team_size: i32,
    pub status: EventStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            organizer_id: event.organizer_id,
            venue_id: event.venue_id,
            name: event.name,
            description: event.description,
            category: event.category,
            rules: event.rules,
            event_date: event.event_date,
            registration_fee: event.registration_fee,
            max_participants: event.max_participants,
            max_team_size: event.max_team_size,
            status: event.status,
            rejection_reason: event.rejection_reason,
            created_at: event.created_at,
        }
    }
}

// ============================================================================
// Rounds
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoundRequest {
    pub name: String,
    pub round_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundCreatedResponse {
    pub round_id: RoundId,
    pub round_number: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponse {
    pub round_id: RoundId,
    pub event_id: EventId,
    pub round_number: i32,
    pub name: String,
    pub round_date: Option<DateTime<Utc>>,
}

impl From<Round> for RoundResponse {
    fn from(round: Round) -> Self {
        Self {
            round_id: round.round_id,
            event_id: round.event_id,
            round_number: round.round_number,
            name: round.name,
            round_date: round.round_date,
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamRequest {
    pub event_id: EventId,
    #[serde(default)]
    pub member_emails: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamResponse {
    pub team_id: TeamId,
    pub participant_ids: Vec<ParticipantId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub participant_id: ParticipantId,
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub team_id: TeamId,
    pub payment_status: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<UserRegistration> for RegistrationResponse {
    fn from(r: UserRegistration) -> Self {
        Self {
            participant_id: r.participant_id,
            event_id: r.event_id,
            event_name: r.event_name,
            event_date: r.event_date,
            team_id: r.team_id,
            payment_status: r.payment_status,
            registered_at: r.registered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub participant_id: ParticipantId,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub payment_status: bool,
}

impl From<ParticipantEntry> for ParticipantResponse {
    fn from(p: ParticipantEntry) -> Self {
        Self {
            participant_id: p.participant_id,
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            payment_status: p.payment_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRosterResponse {
    pub team_id: TeamId,
    pub payment_status: bool,
    pub members: Vec<ParticipantResponse>,
}

impl From<TeamRoster> for TeamRosterResponse {
    fn from(team: TeamRoster) -> Self {
        Self {
            team_id: team.team_id,
            payment_status: team.payment_status,
            members: team.members.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Judging
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignJudgeRequest {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeAssignedResponse {
    pub judge_id: JudgeId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkScoreRequest {
    pub round_id: RoundId,
    pub team_id: String,
    pub score: i32,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCreatedResponse {
    pub score_id: ScoreId,
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResultResponse {
    pub rank: u32,
    pub team_id: TeamId,
    pub members: Vec<String>,
    /// Rounded to two decimals
    pub average_score: f64,
    pub rounds_scored: u32,
}

impl From<TeamResult> for TeamResultResponse {
    fn from(r: TeamResult) -> Self {
        Self {
            rank: r.rank,
            team_id: r.team_id,
            members: r.members,
            average_score: (r.average_score * 100.0).round() / 100.0,
            rounds_scored: r.rounds_scored,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub results: Vec<TeamResultResponse>,
}

impl From<EventResults> for ResultsResponse {
    fn from(r: EventResults) -> Self {
        Self {
            event_id: r.event_id,
            event_name: r.event_name,
            results: r.results.into_iter().map(Into::into).collect(),
        }
    }
}
