//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{EventId, Id, ParticipantId, RoundId, ScoreId, UserId, VenueId};
use kernel::role::UserRole;
use kernel::team::TeamId;
use sqlx::PgPool;

use crate::domain::entity::*;
use crate::domain::repository::{
    EventRepository, JudgeRepository, MemberDirectory, RegistrationRepository, RoundRepository,
    ScoreRepository, VenueRepository,
};
use crate::domain::value_object::EventStatus;
use crate::error::{EventError, EventResult};

/// PostgreSQL-backed event repository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation to a domain error, anything else to `Database`.
fn on_unique_violation(err: sqlx::Error, conflict: EventError) -> EventError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => conflict,
        _ => EventError::Database(err),
    }
}

// ============================================================================
// Venue Repository Implementation
// ============================================================================

impl VenueRepository for PgEventRepository {
    async fn create_venue(&self, venue: &NewVenue) -> EventResult<Venue> {
        let row = sqlx::query_as::<_, VenueRow>(
            r#"
            INSERT INTO venue (name, location, capacity)
            VALUES ($1, $2, $3)
            RETURNING venue_id, name, location, capacity, created_at
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.location)
        .bind(venue.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_venue())
    }

    async fn find_venue(&self, venue_id: VenueId) -> EventResult<Option<Venue>> {
        let row = sqlx::query_as::<_, VenueRow>(
            r#"
            SELECT venue_id, name, location, capacity, created_at
            FROM venue
            WHERE venue_id = $1
            "#,
        )
        .bind(venue_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VenueRow::into_venue))
    }

    async fn list_venues(&self) -> EventResult<Vec<Venue>> {
        let rows = sqlx::query_as::<_, VenueRow>(
            r#"
            SELECT venue_id, name, location, capacity, created_at
            FROM venue
            ORDER BY name, venue_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VenueRow::into_venue).collect())
    }
}

// ============================================================================
// Event Repository Implementation
// ============================================================================

impl EventRepository for PgEventRepository {
    async fn create_event(&self, event: &NewEvent) -> EventResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO event (
                organizer_id, venue_id, name, description, category, rules,
                event_date, registration_fee, max_participants, max_team_size
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING event_id, organizer_id, venue_id, name, description, category, rules,
                      event_date, registration_fee, max_participants, max_team_size,
                      status, rejection_reason, created_at, updated_at
            "#,
        )
        .bind(event.organizer_id.get())
        .bind(event.venue_id.map(|id| id.get()))
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.category)
        .bind(&event.rules)
        .bind(event.event_date)
        .bind(event.registration_fee)
        .bind(event.max_participants)
        .bind(event.max_team_size)
        .fetch_one(&self.pool)
        .await?;

        row.into_event()
    }

    async fn find_event(&self, event_id: EventId) -> EventResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT event_id, organizer_id, venue_id, name, description, category, rules,
                   event_date, registration_fee, max_participants, max_team_size,
                   status, rejection_reason, created_at, updated_at
            FROM event
            WHERE event_id = $1
            "#,
        )
        .bind(event_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventRow::into_event).transpose()
    }

    async fn list_events(
        &self,
        status: EventStatus,
        category: Option<&str>,
    ) -> EventResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT event_id, organizer_id, venue_id, name, description, category, rules,
                   event_date, registration_fee, max_participants, max_team_size,
                   status, rejection_reason, created_at, updated_at
            FROM event
            WHERE status = $1 AND ($2::TEXT IS NULL OR category = $2)
            ORDER BY event_date, event_id
            "#,
        )
        .bind(status.code())
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    async fn list_events_by_organizer(&self, organizer_id: UserId) -> EventResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT event_id, organizer_id, venue_id, name, description, category, rules,
                   event_date, registration_fee, max_participants, max_team_size,
                   status, rejection_reason, created_at, updated_at
            FROM event
            WHERE organizer_id = $1
            ORDER BY event_date, event_id
            "#,
        )
        .bind(organizer_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    async fn update_event_status(
        &self,
        event_id: EventId,
        from: EventStatus,
        to: EventStatus,
        reason: Option<&str>,
    ) -> EventResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE event
            SET status = $3, rejection_reason = $4, updated_at = now()
            WHERE event_id = $1 AND status = $2
            RETURNING event_id, organizer_id, venue_id, name, description, category, rules,
                      event_date, registration_fee, max_participants, max_team_size,
                      status, rejection_reason, created_at, updated_at
            "#,
        )
        .bind(event_id.get())
        .bind(from.code())
        .bind(to.code())
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventRow::into_event).transpose()
    }
}

// ============================================================================
// Round Repository Implementation
// ============================================================================

impl RoundRepository for PgEventRepository {
    async fn create_round(&self, round: &NewRound) -> EventResult<Round> {
        // An aggregate without GROUP BY yields one row even for the first round.
        let row = sqlx::query_as::<_, RoundRow>(
            r#"
            INSERT INTO event_round (event_id, round_number, name, round_date)
            SELECT $1, COALESCE(MAX(round_number), 0) + 1, $2, $3
            FROM event_round
            WHERE event_id = $1
            RETURNING round_id, event_id, round_number, name, round_date
            "#,
        )
        .bind(round.event_id.get())
        .bind(&round.name)
        .bind(round.round_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_round())
    }

    async fn find_round(&self, round_id: RoundId) -> EventResult<Option<Round>> {
        let row = sqlx::query_as::<_, RoundRow>(
            r#"
            SELECT round_id, event_id, round_number, name, round_date
            FROM event_round
            WHERE round_id = $1
            "#,
        )
        .bind(round_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoundRow::into_round))
    }

    async fn list_rounds(&self, event_id: EventId) -> EventResult<Vec<Round>> {
        let rows = sqlx::query_as::<_, RoundRow>(
            r#"
            SELECT round_id, event_id, round_number, name, round_date
            FROM event_round
            WHERE event_id = $1
            ORDER BY round_number
            "#,
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoundRow::into_round).collect())
    }
}

// ============================================================================
// Member Directory Implementation
// ============================================================================

impl MemberDirectory for PgEventRepository {
    async fn find_members_by_emails(&self, emails: &[String]) -> EventResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, name, email, role
            FROM users
            WHERE email = ANY($1)
            "#,
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }

    async fn find_member(&self, user_id: UserId) -> EventResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            "SELECT user_id, name, email, role FROM users WHERE user_id = $1",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemberRow::into_member).transpose()
    }
}

// ============================================================================
// Registration Repository Implementation
// ============================================================================

impl RegistrationRepository for PgEventRepository {
    async fn find_registered_users(
        &self,
        event_id: EventId,
        user_ids: &[UserId],
    ) -> EventResult<Vec<UserId>> {
        let ids: Vec<i64> = user_ids.iter().map(|id| id.get()).collect();
        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM participant WHERE event_id = $1 AND user_id = ANY($2)",
        )
        .bind(event_id.get())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Id::new).collect())
    }

    async fn register_team(
        &self,
        registration: &NewRegistration,
    ) -> EventResult<Vec<ParticipantId>> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent registrations for the same event. The status
        // is re-read under the lock so a concurrent reject wins.
        let (status, max_participants) = sqlx::query_as::<_, (String, i32)>(
            "SELECT status, max_participants FROM event WHERE event_id = $1 FOR UPDATE",
        )
        .bind(registration.event_id.get())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventError::EventNotFound)?;

        if EventStatus::from_code(&status) != Some(EventStatus::Approved) {
            return Err(EventError::NotApproved);
        }

        let current = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participant WHERE event_id = $1",
        )
        .bind(registration.event_id.get())
        .fetch_one(&mut *tx)
        .await?;

        if current + registration.members.len() as i64 > i64::from(max_participants) {
            return Err(EventError::EventFull);
        }

        let mut participant_ids = Vec::with_capacity(registration.members.len());
        for user_id in &registration.members {
            let id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO participant (event_id, user_id, team_id)
                VALUES ($1, $2, $3)
                RETURNING participant_id
                "#,
            )
            .bind(registration.event_id.get())
            .bind(user_id.get())
            .bind(registration.team_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| on_unique_violation(e, EventError::AlreadyRegistered))?;
            participant_ids.push(Id::new(id));
        }

        tx.commit().await?;

        Ok(participant_ids)
    }

    async fn team_exists(&self, event_id: EventId, team_id: &TeamId) -> EventResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM participant WHERE event_id = $1 AND team_id = $2)",
        )
        .bind(event_id.get())
        .bind(team_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_participants(&self, event_id: EventId) -> EventResult<Vec<ParticipantEntry>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT p.participant_id, p.user_id, u.name, u.email, p.team_id,
                   p.payment_status, p.registered_at
            FROM participant p
            JOIN users u ON u.user_id = p.user_id
            WHERE p.event_id = $1
            ORDER BY p.team_id, p.participant_id
            "#,
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ParticipantRow::into_entry).collect()
    }

    async fn list_user_registrations(
        &self,
        user_id: UserId,
    ) -> EventResult<Vec<UserRegistration>> {
        let rows = sqlx::query_as::<_, UserRegistrationRow>(
            r#"
            SELECT p.participant_id, p.event_id, e.name AS event_name, e.event_date,
                   p.team_id, p.payment_status, p.registered_at
            FROM participant p
            JOIN event e ON e.event_id = p.event_id
            WHERE p.user_id = $1
            ORDER BY e.event_date, p.participant_id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(UserRegistrationRow::into_registration)
            .collect()
    }
}

// ============================================================================
// Judge Repository Implementation
// ============================================================================

impl JudgeRepository for PgEventRepository {
    async fn assign_judge(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> EventResult<JudgeAssignment> {
        let judge_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO judge (event_id, user_id) VALUES ($1, $2) RETURNING judge_id",
        )
        .bind(event_id.get())
        .bind(user_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, EventError::JudgeAlreadyAssigned))?;

        Ok(JudgeAssignment {
            judge_id: Id::new(judge_id),
            event_id,
            user_id,
        })
    }

    async fn is_assigned_judge(&self, event_id: EventId, user_id: UserId) -> EventResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM judge WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id.get())
        .bind(user_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_judged_events(&self, user_id: UserId) -> EventResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT e.event_id, e.organizer_id, e.venue_id, e.name, e.description, e.category,
                   e.rules, e.event_date, e.registration_fee, e.max_participants,
                   e.max_team_size, e.status, e.rejection_reason, e.created_at, e.updated_at
            FROM event e
            JOIN judge j ON j.event_id = e.event_id
            WHERE j.user_id = $1
            ORDER BY e.event_date, e.event_id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }
}

// ============================================================================
// Score Repository Implementation
// ============================================================================

impl ScoreRepository for PgEventRepository {
    async fn insert_score(&self, score: &NewScore) -> EventResult<ScoreId> {
        let score_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO score (round_id, judge_user_id, team_id, points, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING score_id
            "#,
        )
        .bind(score.round_id.get())
        .bind(score.judge_user_id.get())
        .bind(score.team_id.as_str())
        .bind(score.points)
        .bind(&score.remarks)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, EventError::DuplicateScore))?;

        Ok(Id::new(score_id))
    }

    async fn list_event_scores(&self, event_id: EventId) -> EventResult<Vec<ScoreEntry>> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT s.round_id, s.judge_user_id, s.team_id, s.points
            FROM score s
            JOIN event_round r ON r.round_id = s.round_id
            WHERE r.event_id = $1
            "#,
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ScoreRow::into_entry).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn parse_team(team_id: &str) -> EventResult<TeamId> {
    TeamId::parse_str(team_id)
        .map_err(|_| EventError::Internal(format!("Invalid team id in database: {}", team_id)))
}

#[derive(sqlx::FromRow)]
struct VenueRow {
    venue_id: i64,
    name: String,
    location: String,
    capacity: i32,
    created_at: DateTime<Utc>,
}

impl VenueRow {
    fn into_venue(self) -> Venue {
        Venue {
            venue_id: Id::new(self.venue_id),
            name: self.name,
            location: self.location,
            capacity: self.capacity,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    event_id: i64,
    organizer_id: i64,
    venue_id: Option<i64>,
    name: String,
    description: Option<String>,
    category: String,
    rules: Option<String>,
    event_date: DateTime<Utc>,
    registration_fee: i64,
    max_participants: i32,
    max_team_size: i32,
    status: String,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self) -> EventResult<Event> {
        let status = EventStatus::from_code(&self.status).ok_or_else(|| {
            EventError::Internal(format!("Invalid event status in database: {}", self.status))
        })?;

        Ok(Event {
            event_id: Id::new(self.event_id),
            organizer_id: Id::new(self.organizer_id),
            venue_id: self.venue_id.map(Id::new),
            name: self.name,
            description: self.description,
            category: self.category,
            rules: self.rules,
            event_date: self.event_date,
            registration_fee: self.registration_fee,
            max_participants: self.max_participants,
            max_team_size: self.max_team_size,
            status,
            rejection_reason: self.rejection_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoundRow {
    round_id: i64,
    event_id: i64,
    round_number: i32,
    name: String,
    round_date: Option<DateTime<Utc>>,
}

impl RoundRow {
    fn into_round(self) -> Round {
        Round {
            round_id: Id::new(self.round_id),
            event_id: Id::new(self.event_id),
            round_number: self.round_number,
            name: self.name,
            round_date: self.round_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    user_id: i64,
    name: String,
    email: String,
    role: String,
}

impl MemberRow {
    fn into_member(self) -> EventResult<Member> {
        let role = UserRole::from_code(&self.role).ok_or_else(|| {
            EventError::Internal(format!("Invalid role in database: {}", self.role))
        })?;

        Ok(Member {
            user_id: Id::new(self.user_id),
            name: self.name,
            email: self.email,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    participant_id: i64,
    user_id: i64,
    name: String,
    email: String,
    team_id: String,
    payment_status: bool,
    registered_at: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_entry(self) -> EventResult<ParticipantEntry> {
        Ok(ParticipantEntry {
            participant_id: Id::new(self.participant_id),
            user_id: Id::new(self.user_id),
            name: self.name,
            email: self.email,
            team_id: parse_team(&self.team_id)?,
            payment_status: self.payment_status,
            registered_at: self.registered_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRegistrationRow {
    participant_id: i64,
    event_id: i64,
    event_name: String,
    event_date: DateTime<Utc>,
    team_id: String,
    payment_status: bool,
    registered_at: DateTime<Utc>,
}

impl UserRegistrationRow {
    fn into_registration(self) -> EventResult<UserRegistration> {
        Ok(UserRegistration {
            participant_id: Id::new(self.participant_id),
            event_id: Id::new(self.event_id),
            event_name: self.event_name,
            event_date: self.event_date,
            team_id: parse_team(&self.team_id)?,
            payment_status: self.payment_status,
            registered_at: self.registered_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ScoreRow {
    round_id: i64,
    judge_user_id: i64,
    team_id: String,
    points: i32,
}

impl ScoreRow {
    fn into_entry(self) -> EventResult<ScoreEntry> {
        Ok(ScoreEntry {
            round_id: Id::new(self.round_id),
            judge_user_id: Id::new(self.judge_user_id),
            team_id: parse_team(&self.team_id)?,
            points: self.points,
        })
    }
}
