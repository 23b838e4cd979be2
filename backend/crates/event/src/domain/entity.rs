//! Event entities

use chrono::{DateTime, Utc};
use kernel::id::{EventId, JudgeId, ParticipantId, RoundId, UserId, VenueId};
use kernel::principal::Principal;
use kernel::role::UserRole;
use kernel::team::TeamId;

use crate::domain::value_object::EventStatus;
use crate::error::{EventError, EventResult};

// ============================================================================
// Venue
// ============================================================================

#[derive(Debug, Clone)]
pub struct Venue {
    pub venue_id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub location: String,
    pub capacity: i32,
}

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub organizer_id: UserId,
    pub venue_id: Option<VenueId>,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub rules: Option<String>,
    pub event_date: DateTime<Utc>,
    /// Per team, in the smallest currency unit
    pub registration_fee: i64,
    pub max_participants: i32,
    pub max_team_size: i32,
    pub status: EventStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Organizer of this event, or any admin.
    pub fn ensure_manager(&self, principal: &Principal) -> EventResult<()> {
        if principal.is_admin() || principal.user_id == self.organizer_id {
            Ok(())
        } else {
            Err(EventError::NotEventManager)
        }
    }

    pub fn is_open_for_registration(&self) -> bool {
        self.status == EventStatus::Approved
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
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
}

// ============================================================================
// Round
// ============================================================================

#[derive(Debug, Clone)]
pub struct Round {
    pub round_id: RoundId,
    pub event_id: EventId,
    /// 1-based, contiguous per event
    pub round_number: i32,
    pub name: String,
    pub round_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewRound {
    pub event_id: EventId,
    pub name: String,
    pub round_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Registration
// ============================================================================

/// A user as seen when forming teams or assigning judges
#[derive(Debug, Clone)]
pub struct Member {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub members: Vec<UserId>,
}

/// One participant row joined with the user
#[derive(Debug, Clone)]
pub struct ParticipantEntry {
    pub participant_id: ParticipantId,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub team_id: TeamId,
    pub payment_status: bool,
    pub registered_at: DateTime<Utc>,
}

/// One participant row joined with its event, as shown to the member
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub participant_id: ParticipantId,
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub team_id: TeamId,
    pub payment_status: bool,
    pub registered_at: DateTime<Utc>,
}

// ============================================================================
// Judging
// ============================================================================

#[derive(Debug, Clone)]
pub struct JudgeAssignment {
    pub judge_id: JudgeId,
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct NewScore {
    pub round_id: RoundId,
    pub judge_user_id: UserId,
    pub team_id: TeamId,
    pub points: i32,
    pub remarks: Option<String>,
}

/// Minimal projection of a score used for aggregation
#[derive(Debug, Clone)]
pub struct ScoreEntry {
    pub round_id: RoundId,
    pub judge_user_id: UserId,
    pub team_id: TeamId,
    pub points: i32,
}
