//! Unit tests for the event crate
//!
//! Use cases and routes run against an in-memory store, so no database
//! is required.

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, Utc};
    use kernel::id::{EventId, Id, ParticipantId, RoundId, ScoreId, UserId, VenueId};
    use kernel::role::UserRole;
    use kernel::team::TeamId;

    use crate::domain::entity::*;
    use crate::domain::repository::*;
    use crate::domain::value_object::EventStatus;
    use crate::error::{EventError, EventResult};

    #[derive(Default)]
    struct State {
        members: Vec<Member>,
        venues: Vec<Venue>,
        events: Vec<Event>,
        rounds: Vec<Round>,
        participants: Vec<(EventId, ParticipantEntry)>,
        judges: Vec<JudgeAssignment>,
        scores: Vec<(ScoreId, NewScore)>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryEventStore {
        state: Arc<Mutex<State>>,
    }

    impl MemoryEventStore {
        pub fn add_member(&self, name: &str, email: &str, role: UserRole) -> UserId {
            let mut state = self.state.lock().unwrap();
            let user_id = Id::new(state.members.len() as i64 + 1);
            state.members.push(Member {
                user_id,
                name: name.to_string(),
                email: email.to_string(),
                role,
            });
            user_id
        }

        /// Event owned by `organizer_id`, already in `status`.
        pub fn seed_event(
            &self,
            organizer_id: UserId,
            status: EventStatus,
            max_participants: i32,
            max_team_size: i32,
        ) -> EventId {
            let mut state = self.state.lock().unwrap();
            let event_id = Id::new(state.events.len() as i64 + 1);
            let now = Utc::now();
            state.events.push(Event {
                event_id,
                organizer_id,
                venue_id: None,
                name: format!("Event {}", event_id),
                description: None,
                category: "coding".to_string(),
                rules: None,
                event_date: now + Duration::days(30),
                registration_fee: 1500,
                max_participants,
                max_team_size,
                status,
                rejection_reason: None,
                created_at: now,
                updated_at: now,
            });
            event_id
        }

        pub fn event_status(&self, event_id: EventId) -> Option<EventStatus> {
            let state = self.state.lock().unwrap();
            state
                .events
                .iter()
                .find(|e| e.event_id == event_id)
                .map(|e| e.status)
        }

        pub fn participant_count(&self, event_id: EventId) -> usize {
            let state = self.state.lock().unwrap();
            state
                .participants
                .iter()
                .filter(|(e, _)| *e == event_id)
                .count()
        }
    }

    impl VenueRepository for MemoryEventStore {
        async fn create_venue(&self, venue: &NewVenue) -> EventResult<Venue> {
            let mut state = self.state.lock().unwrap();
            let venue = Venue {
                venue_id: Id::new(state.venues.len() as i64 + 1),
                name: venue.name.clone(),
                location: venue.location.clone(),
                capacity: venue.capacity,
                created_at: Utc::now(),
            };
            state.venues.push(venue.clone());
            Ok(venue)
        }

        async fn find_venue(&self, venue_id: VenueId) -> EventResult<Option<Venue>> {
            let state = self.state.lock().unwrap();
            Ok(state.venues.iter().find(|v| v.venue_id == venue_id).cloned())
        }

        async fn list_venues(&self) -> EventResult<Vec<Venue>> {
            Ok(self.state.lock().unwrap().venues.clone())
        }
    }

    impl EventRepository for MemoryEventStore {
        async fn create_event(&self, event: &NewEvent) -> EventResult<Event> {
            let mut state = self.state.lock().unwrap();
            let now = Utc::now();
            let event = Event {
                event_id: Id::new(state.events.len() as i64 + 1),
                organizer_id: event.organizer_id,
                venue_id: event.venue_id,
                name: event.name.clone(),
                description: event.description.clone(),
                category: event.category.clone(),
                rules: event.rules.clone(),
                event_date: event.event_date,
                registration_fee: event.registration_fee,
                max_participants: event.max_participants,
                max_team_size: event.max_team_size,
                status: EventStatus::Pending,
                rejection_reason: None,
                created_at: now,
                updated_at: now,
            };
            state.events.push(event.clone());
            Ok(event)
        }

        async fn find_event(&self, event_id: EventId) -> EventResult<Option<Event>> {
            let state = self.state.lock().unwrap();
            Ok(state.events.iter().find(|e| e.event_id == event_id).cloned())
        }

        async fn list_events(
            &self,
            status: EventStatus,
            category: Option<&str>,
        ) -> EventResult<Vec<Event>> {
            let state = self.state.lock().unwrap();
            let mut events: Vec<Event> = state
                .events
                .iter()
                .filter(|e| e.status == status)
                .filter(|e| category.is_none_or(|c| e.category == c))
                .cloned()
                .collect();
            events.sort_by_key(|e| (e.event_date, e.event_id));
            Ok(events)
        }

        async fn list_events_by_organizer(&self, organizer_id: UserId) -> EventResult<Vec<Event>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .events
                .iter()
                .filter(|e| e.organizer_id == organizer_id)
                .cloned()
                .collect())
        }

        async fn update_event_status(
            &self,
            event_id: EventId,
            from: EventStatus,
            to: EventStatus,
            reason: Option<&str>,
        ) -> EventResult<Option<Event>> {
            let mut state = self.state.lock().unwrap();
            let updated = state
                .events
                .iter_mut()
                .find(|e| e.event_id == event_id && e.status == from)
                .map(|e| {
                    e.status = to;
                    e.rejection_reason = reason.map(str::to_string);
                    e.updated_at = Utc::now();
                    e.clone()
                });
            Ok(updated)
        }
    }

    impl RoundRepository for MemoryEventStore {
        async fn create_round(&self, round: &NewRound) -> EventResult<Round> {
            let mut state = self.state.lock().unwrap();
            let next = state
                .rounds
                .iter()
                .filter(|r| r.event_id == round.event_id)
                .map(|r| r.round_number)
                .max()
                .unwrap_or(0)
                + 1;
            let round = Round {
                round_id: Id::new(state.rounds.len() as i64 + 1),
                event_id: round.event_id,
                round_number: next,
                name: round.name.clone(),
                round_date: round.round_date,
            };
            state.rounds.push(round.clone());
            Ok(round)
        }

        async fn find_round(&self, round_id: RoundId) -> EventResult<Option<Round>> {
            let state = self.state.lock().unwrap();
            Ok(state.rounds.iter().find(|r| r.round_id == round_id).cloned())
        }

        async fn list_rounds(&self, event_id: EventId) -> EventResult<Vec<Round>> {
            let state = self.state.lock().unwrap();
            let mut rounds: Vec<Round> = state
                .rounds
                .iter()
                .filter(|r| r.event_id == event_id)
                .cloned()
                .collect();
            rounds.sort_by_key(|r| r.round_number);
            Ok(rounds)
        }
    }

    impl MemberDirectory for MemoryEventStore {
        async fn find_members_by_emails(&self, emails: &[String]) -> EventResult<Vec<Member>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .members
                .iter()
                .filter(|m| emails.contains(&m.email))
                .cloned()
                .collect())
        }

        async fn find_member(&self, user_id: UserId) -> EventResult<Option<Member>> {
            let state = self.state.lock().unwrap();
            Ok(state.members.iter().find(|m| m.user_id == user_id).cloned())
        }
    }

    impl RegistrationRepository for MemoryEventStore {
        async fn find_registered_users(
            &self,
            event_id: EventId,
            user_ids: &[UserId],
        ) -> EventResult<Vec<UserId>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .participants
                .iter()
                .filter(|(e, p)| *e == event_id && user_ids.contains(&p.user_id))
                .map(|(_, p)| p.user_id)
                .collect())
        }

        async fn register_team(
            &self,
            registration: &NewRegistration,
        ) -> EventResult<Vec<ParticipantId>> {
            let mut state = self.state.lock().unwrap();
            let (status, max) = state
                .events
                .iter()
                .find(|e| e.event_id == registration.event_id)
                .map(|e| (e.status, e.max_participants))
                .ok_or(EventError::EventNotFound)?;
            if status != EventStatus::Approved {
                return Err(EventError::NotApproved);
            }
            let current = state
                .participants
                .iter()
                .filter(|(e, _)| *e == registration.event_id)
                .count();
            if current + registration.members.len() > max as usize {
                return Err(EventError::EventFull);
            }

            let mut ids = Vec::new();
            for user_id in &registration.members {
                let member = state
                    .members
                    .iter()
                    .find(|m| m.user_id == *user_id)
                    .cloned()
                    .ok_or(EventError::UserNotFound)?;
                let participant_id = Id::new(state.participants.len() as i64 + 1);
                state.participants.push((
                    registration.event_id,
                    ParticipantEntry {
                        participant_id,
                        user_id: *user_id,
                        name: member.name,
                        email: member.email,
                        team_id: registration.team_id,
                        payment_status: false,
                        registered_at: Utc::now(),
                    },
                ));
                ids.push(participant_id);
            }
            Ok(ids)
        }

        async fn team_exists(&self, event_id: EventId, team_id: &TeamId) -> EventResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state
                .participants
                .iter()
                .any(|(e, p)| *e == event_id && p.team_id == *team_id))
        }

        async fn list_participants(
            &self,
            event_id: EventId,
        ) -> EventResult<Vec<ParticipantEntry>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .participants
                .iter()
                .filter(|(e, _)| *e == event_id)
                .map(|(_, p)| p.clone())
                .collect())
        }

        async fn list_user_registrations(
            &self,
            user_id: UserId,
        ) -> EventResult<Vec<UserRegistration>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .participants
                .iter()
                .filter(|(_, p)| p.user_id == user_id)
                .filter_map(|(event_id, p)| {
                    let event = state.events.iter().find(|e| e.event_id == *event_id)?;
                    Some(UserRegistration {
                        participant_id: p.participant_id,
                        event_id: *event_id,
                        event_name: event.name.clone(),
                        event_date: event.event_date,
                        team_id: p.team_id,
                        payment_status: p.payment_status,
                        registered_at: p.registered_at,
                    })
                })
                .collect())
        }
    }

    impl JudgeRepository for MemoryEventStore {
        async fn assign_judge(
            &self,
            event_id: EventId,
            user_id: UserId,
        ) -> EventResult<JudgeAssignment> {
            let mut state = self.state.lock().unwrap();
            if state
                .judges
                .iter()
                .any(|j| j.event_id == event_id && j.user_id == user_id)
            {
                return Err(EventError::JudgeAlreadyAssigned);
            }
            let assignment = JudgeAssignment {
                judge_id: Id::new(state.judges.len() as i64 + 1),
                event_id,
                user_id,
            };
            state.judges.push(assignment.clone());
            Ok(assignment)
        }

        async fn is_assigned_judge(&self, event_id: EventId, user_id: UserId) -> EventResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state
                .judges
                .iter()
                .any(|j| j.event_id == event_id && j.user_id == user_id))
        }

        async fn list_judged_events(&self, user_id: UserId) -> EventResult<Vec<Event>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .judges
                .iter()
                .filter(|j| j.user_id == user_id)
                .filter_map(|j| state.events.iter().find(|e| e.event_id == j.event_id))
                .cloned()
                .collect())
        }
    }

    impl ScoreRepository for MemoryEventStore {
        async fn insert_score(&self, score: &NewScore) -> EventResult<ScoreId> {
            let mut state = self.state.lock().unwrap();
            if state.scores.iter().any(|(_, s)| {
                s.round_id == score.round_id
                    && s.judge_user_id == score.judge_user_id
                    && s.team_id == score.team_id
            }) {
                return Err(EventError::DuplicateScore);
            }
            let score_id = Id::new(state.scores.len() as i64 + 1);
            state.scores.push((score_id, score.clone()));
            Ok(score_id)
        }

        async fn list_event_scores(&self, event_id: EventId) -> EventResult<Vec<ScoreEntry>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .scores
                .iter()
                .filter(|(_, s)| {
                    state
                        .rounds
                        .iter()
                        .any(|r| r.round_id == s.round_id && r.event_id == event_id)
                })
                .map(|(_, s)| ScoreEntry {
                    round_id: s.round_id,
                    judge_user_id: s.judge_user_id,
                    team_id: s.team_id,
                    points: s.points,
                })
                .collect())
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use kernel::id::UserId;
    use kernel::principal::Principal;
    use kernel::role::UserRole;

    use super::memory::MemoryEventStore;

    pub fn principal(store: &MemoryEventStore, name: &str, role: UserRole) -> Principal {
        let email = format!("{}@nu.edu.pk", name.to_lowercase());
        let user_id: UserId = store.add_member(name, &email, role);
        Principal {
            user_id,
            name: name.to_string(),
            email,
            role,
        }
    }
}

#[cfg(test)]
mod event_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::Id;
    use kernel::role::UserRole;

    use super::fixtures::principal;
    use super::memory::MemoryEventStore;
    use crate::application::*;
    use crate::domain::value_object::EventStatus;
    use crate::error::EventError;

    fn create_input(max_participants: i32) -> CreateEventInput {
        CreateEventInput {
            name: "Speed Programming".to_string(),
            description: Some("  ".to_string()),
            category: "coding".to_string(),
            rules: None,
            event_date: Utc::now() + Duration::days(10),
            venue_id: None,
            registration_fee: 2000,
            max_participants,
            max_team_size: Some(3),
        }
    }

    #[tokio::test]
    async fn test_organizer_creates_pending_event() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);

        let event = CreateEventUseCase::new(store.clone(), Arc::new(EventConfig::default()))
            .execute(&organizer, create_input(30))
            .await
            .unwrap();

        assert_eq!(event.status, EventStatus::Pending);
        assert_eq!(event.organizer_id, organizer.user_id);
        assert_eq!(event.description, None);
    }

    #[tokio::test]
    async fn test_participant_cannot_create_event() {
        let store = Arc::new(MemoryEventStore::default());
        let participant = principal(&store, "Pat", UserRole::Participant);

        let err = CreateEventUseCase::new(store.clone(), Arc::new(EventConfig::default()))
            .execute(&participant, create_input(30))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_event_validation() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let use_case = CreateEventUseCase::new(store.clone(), Arc::new(EventConfig::default()));

        let zero = use_case.execute(&organizer, create_input(0)).await;
        assert!(matches!(zero, Err(EventError::Validation(_))));

        let mut oversized_team = create_input(2);
        oversized_team.max_team_size = Some(3);
        let oversized = use_case.execute(&organizer, oversized_team).await;
        assert!(matches!(oversized, Err(EventError::Validation(_))));

        let mut unknown_venue = create_input(10);
        unknown_venue.venue_id = Some(Id::new(42));
        let unknown = use_case.execute(&organizer, unknown_venue).await;
        assert!(matches!(unknown, Err(EventError::VenueNotFound)));
    }

    #[tokio::test]
    async fn test_venue_capacity_caps_participants() {
        let store = Arc::new(MemoryEventStore::default());
        let admin = principal(&store, "Admin", UserRole::Admin);

        let venue = CreateVenueUseCase::new(store.clone())
            .execute(
                &admin,
                CreateVenueInput {
                    name: "Auditorium".to_string(),
                    location: "Block A".to_string(),
                    capacity: 20,
                },
            )
            .await
            .unwrap();

        let mut input = create_input(50);
        input.venue_id = Some(venue.venue_id);
        let err = CreateEventUseCase::new(store.clone(), Arc::new(EventConfig::default()))
            .execute(&admin, input)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_venue_requires_positive_capacity() {
        let store = Arc::new(MemoryEventStore::default());
        let admin = principal(&store, "Admin", UserRole::Admin);

        let err = CreateVenueUseCase::new(store.clone())
            .execute(
                &admin,
                CreateVenueInput {
                    name: "Lawn".to_string(),
                    location: "Outside".to_string(),
                    capacity: 0,
                },
            )
            .await
            .err()
            .unwrap();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_approval_is_one_way() {
        let store = Arc::new(MemoryEventStore::default());
        let admin = principal(&store, "Admin", UserRole::Admin);
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Pending, 10, 2);
        let review = ReviewEventUseCase::new(store.clone());

        let approved = review.accept(&admin, event_id).await.unwrap();
        assert_eq!(approved.status, EventStatus::Approved);

        let again = review.accept(&admin, event_id).await.err().unwrap();
        assert!(matches!(
            again,
            EventError::InvalidTransition(EventStatus::Approved)
        ));
        let reject = review.reject(&admin, event_id, None).await.err().unwrap();
        assert_eq!(reject.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reject_records_reason_and_requires_admin() {
        let store = Arc::new(MemoryEventStore::default());
        let admin = principal(&store, "Admin", UserRole::Admin);
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Pending, 10, 2);
        let review = ReviewEventUseCase::new(store.clone());

        let err = review.reject(&organizer, event_id, None).await.err().unwrap();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);

        let rejected = review
            .reject(&admin, event_id, Some("Clashes with finals".to_string()))
            .await
            .unwrap();
        assert_eq!(rejected.status, EventStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Clashes with finals")
        );

        let missing = review.accept(&admin, Id::new(99)).await.err().unwrap();
        assert!(matches!(missing, EventError::EventNotFound));
    }

    #[tokio::test]
    async fn test_public_listing_shows_only_approved() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        store.seed_event(organizer.user_id, EventStatus::Pending, 10, 1);
        let approved = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 1);

        let queries = EventQueriesUseCase::new(store.clone());
        let listed = queries.list_approved(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event_id, approved);

        assert!(queries.list_approved(Some("robotics")).await.unwrap().is_empty());
        assert_eq!(queries.organized_by(&organizer).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_round_numbers_are_sequential() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let other = principal(&store, "Other", UserRole::Organizer);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 1);
        let add = AddRoundUseCase::new(store.clone());

        for (expected, name) in [(1, "Prelims"), (2, "Finals")] {
            let round = add
                .execute(
                    &organizer,
                    AddRoundInput {
                        event_id,
                        name: name.to_string(),
                        round_date: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(round.round_number, expected);
        }

        let err = add
            .execute(
                &other,
                AddRoundInput {
                    event_id,
                    name: "Bonus".to_string(),
                    round_date: None,
                },
            )
            .await
            .err()
            .unwrap();
        assert!(matches!(err, EventError::NotEventManager));

        let rounds = ListRoundsUseCase::new(store.clone())
            .execute(event_id)
            .await
            .unwrap();
        let names: Vec<&str> = rounds.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Prelims", "Finals"]);
    }
}

#[cfg(test)]
mod registration_tests {
    use std::sync::Arc;

    use kernel::role::UserRole;

    use kernel::team::TeamId;

    use super::fixtures::principal;
    use super::memory::MemoryEventStore;
    use crate::application::*;
    use crate::domain::entity::NewRegistration;
    use crate::domain::repository::RegistrationRepository;
    use crate::domain::value_object::EventStatus;
    use crate::error::EventError;

    fn input(event_id: kernel::id::EventId, emails: &[&str]) -> RegisterTeamInput {
        RegisterTeamInput {
            event_id,
            member_emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_team_shares_one_team_id() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let lead = principal(&store, "Lead", UserRole::Participant);
        principal(&store, "Mate", UserRole::Participant);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 3);

        let output = RegisterTeamUseCase::new(store.clone())
            .execute(&lead, input(event_id, &["MATE@nu.edu.pk"]))
            .await
            .unwrap();
        assert_eq!(output.participant_ids.len(), 2);

        let teams = EventParticipantsUseCase::new(store.clone())
            .execute(&organizer, event_id)
            .await
            .unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_id, output.team_id);
        assert_eq!(teams[0].members.len(), 2);
        assert!(!teams[0].payment_status);

        let mine = MyRegistrationsUseCase::new(store.clone())
            .execute(&lead)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].team_id, output.team_id);
    }

    #[tokio::test]
    async fn test_store_refuses_event_rejected_after_checks() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let admin = principal(&store, "Admin", UserRole::Admin);
        let lead = principal(&store, "Lead", UserRole::Participant);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 2);

        // The use case saw an approved event; an admin rejects it before the insert.
        ReviewEventUseCase::new(store.clone())
            .reject(&admin, event_id, None)
            .await
            .unwrap();
        let late = store
            .register_team(&NewRegistration {
                event_id,
                team_id: TeamId::generate(),
                members: vec![lead.user_id],
            })
            .await;
        assert!(matches!(late, Err(EventError::NotApproved)));
    }

    #[tokio::test]
    async fn test_registration_rules() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let lead = principal(&store, "Lead", UserRole::Participant);
        principal(&store, "Mate", UserRole::Participant);
        principal(&store, "Judy", UserRole::Judge);
        let pending = store.seed_event(organizer.user_id, EventStatus::Pending, 10, 2);
        let open = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 2);
        let use_case = RegisterTeamUseCase::new(store.clone());

        let not_open = use_case.execute(&lead, input(pending, &[])).await;
        assert!(matches!(not_open, Err(EventError::NotApproved)));

        let too_big = use_case
            .execute(&lead, input(open, &["mate@nu.edu.pk", "judy@nu.edu.pk"]))
            .await;
        assert!(matches!(too_big, Err(EventError::TeamTooLarge { max: 2 })));

        let unknown = use_case
            .execute(&lead, input(open, &["ghost@nu.edu.pk"]))
            .await;
        assert!(matches!(unknown, Err(EventError::UnknownMember(_))));

        let judge = use_case
            .execute(&lead, input(open, &["judy@nu.edu.pk"]))
            .await;
        assert!(matches!(judge, Err(EventError::MemberNotParticipant(_))));

        let missing = use_case
            .execute(&lead, input(kernel::id::Id::new(99), &[]))
            .await;
        assert!(matches!(missing, Err(EventError::EventNotFound)));

        use_case
            .execute(&lead, input(open, &["mate@nu.edu.pk"]))
            .await
            .unwrap();
        let twice = use_case.execute(&lead, input(open, &[])).await;
        assert!(matches!(twice, Err(EventError::AlreadyRegistered)));
        assert_eq!(store.participant_count(open), 2);
    }

    #[tokio::test]
    async fn test_solo_registration_by_non_participant_is_forbidden() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let open = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 2);

        let err = RegisterTeamUseCase::new(store.clone())
            .execute(&organizer, input(open, &[]))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_event_full() {
        let store = Arc::new(MemoryEventStore::default());
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let first = principal(&store, "First", UserRole::Participant);
        let second = principal(&store, "Second", UserRole::Participant);
        principal(&store, "Third", UserRole::Participant);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Approved, 2, 2);
        let use_case = RegisterTeamUseCase::new(store.clone());

        use_case.execute(&first, input(event_id, &[])).await.unwrap();
        let err = use_case
            .execute(&second, input(event_id, &["third@nu.edu.pk"]))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, EventError::EventFull));
        assert_eq!(err.to_string(), "Event is full");
        assert_eq!(store.participant_count(event_id), 1);
    }
}

#[cfg(test)]
mod judging_tests {
    use std::sync::Arc;

    use kernel::id::{EventId, Id, RoundId};
    use kernel::principal::Principal;
    use kernel::role::UserRole;
    use kernel::team::TeamId;

    use super::fixtures::principal;
    use super::memory::MemoryEventStore;
    use crate::application::*;
    use crate::domain::value_object::EventStatus;
    use crate::error::EventError;

    struct Scene {
        store: Arc<MemoryEventStore>,
        admin: Principal,
        judge: Principal,
        event_id: EventId,
        round_id: RoundId,
        team: TeamId,
    }

    async fn scene() -> Scene {
        let store = Arc::new(MemoryEventStore::default());
        let admin = principal(&store, "Admin", UserRole::Admin);
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let judge = principal(&store, "Judge", UserRole::Judge);
        let lead = principal(&store, "Lead", UserRole::Participant);
        let event_id = store.seed_event(organizer.user_id, EventStatus::Approved, 10, 2);

        let team = RegisterTeamUseCase::new(store.clone())
            .execute(
                &lead,
                RegisterTeamInput {
                    event_id,
                    member_emails: vec![],
                },
            )
            .await
            .unwrap()
            .team_id;
        let round_id = AddRoundUseCase::new(store.clone())
            .execute(
                &organizer,
                AddRoundInput {
                    event_id,
                    name: "Prelims".to_string(),
                    round_date: None,
                },
            )
            .await
            .unwrap()
            .round_id;

        Scene {
            store,
            admin,
            judge,
            event_id,
            round_id,
            team,
        }
    }

    fn score(scene: &Scene, points: i32) -> MarkScoreInput {
        MarkScoreInput {
            round_id: scene.round_id,
            team_id: scene.team.to_string(),
            score: points,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_assign_judge_rules() {
        let s = scene().await;
        let assign = AssignJudgeUseCase::new(s.store.clone());

        let not_judge = assign.execute(&s.admin, s.event_id, s.admin.user_id).await;
        assert!(matches!(not_judge, Err(EventError::NotJudgeRole)));

        let unknown = assign.execute(&s.admin, s.event_id, Id::new(99)).await;
        assert!(matches!(unknown, Err(EventError::UserNotFound)));

        assign
            .execute(&s.admin, s.event_id, s.judge.user_id)
            .await
            .unwrap();
        let dup = assign.execute(&s.admin, s.event_id, s.judge.user_id).await;
        assert!(matches!(dup, Err(EventError::JudgeAlreadyAssigned)));

        let events = JudgedEventsUseCase::new(s.store.clone())
            .execute(&s.judge)
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, s.event_id);
    }

    #[tokio::test]
    async fn test_mark_score_rules() {
        let s = scene().await;
        let config = Arc::new(EventConfig::default());
        let mark = MarkScoreUseCase::new(s.store.clone(), config);

        let unassigned = mark.execute(&s.judge, score(&s, 80)).await;
        assert!(matches!(unassigned, Err(EventError::NotAssignedJudge)));

        AssignJudgeUseCase::new(s.store.clone())
            .execute(&s.admin, s.event_id, s.judge.user_id)
            .await
            .unwrap();

        let out_of_range = mark.execute(&s.judge, score(&s, 101)).await;
        assert!(matches!(
            out_of_range,
            Err(EventError::ScoreOutOfRange { min: 0, max: 100 })
        ));

        let mut stranger = score(&s, 50);
        stranger.team_id = TeamId::generate().to_string();
        let unknown_team = mark.execute(&s.judge, stranger).await;
        assert!(matches!(unknown_team, Err(EventError::TeamNotRegistered)));

        let mut missing_round = score(&s, 50);
        missing_round.round_id = Id::new(77);
        let missing = mark.execute(&s.judge, missing_round).await;
        assert!(matches!(missing, Err(EventError::RoundNotFound)));

        mark.execute(&s.judge, score(&s, 100)).await.unwrap();
        let dup = mark.execute(&s.judge, score(&s, 90)).await;
        assert!(matches!(dup, Err(EventError::DuplicateScore)));
    }

    #[tokio::test]
    async fn test_results_rank_scored_teams() {
        let s = scene().await;
        let second_judge = principal(&s.store, "Judge2", UserRole::Judge);
        let lead2 = principal(&s.store, "Lead2", UserRole::Participant);
        let team2 = RegisterTeamUseCase::new(s.store.clone())
            .execute(
                &lead2,
                RegisterTeamInput {
                    event_id: s.event_id,
                    member_emails: vec![],
                },
            )
            .await
            .unwrap()
            .team_id;

        let assign = AssignJudgeUseCase::new(s.store.clone());
        for judge in [&s.judge, &second_judge] {
            assign
                .execute(&s.admin, s.event_id, judge.user_id)
                .await
                .unwrap();
        }

        let mark = MarkScoreUseCase::new(s.store.clone(), Arc::new(EventConfig::default()));
        // team: (70 + 90) / 2 = 80; team2: 85 from a single judge
        mark.execute(&s.judge, score(&s, 70)).await.unwrap();
        mark.execute(&second_judge, score(&s, 90)).await.unwrap();
        let mut other = score(&s, 85);
        other.team_id = team2.to_string();
        mark.execute(&s.judge, other).await.unwrap();

        let results = EventResultsUseCase::new(s.store.clone())
            .execute(&s.judge, s.event_id)
            .await
            .unwrap();

        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[0].team_id, team2);
        assert_eq!(results.results[0].rank, 1);
        assert_eq!(results.results[0].members, vec!["Lead2".to_string()]);
        assert_eq!(results.results[1].team_id, s.team);
        assert_eq!(results.results[1].rank, 2);
        assert!((results.results[1].average_score - 80.0).abs() < 1e-9);
        assert_eq!(results.results[1].rounds_scored, 1);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router};
    use kernel::principal::Principal;
    use kernel::role::UserRole;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fixtures::principal;
    use super::memory::MemoryEventStore;
    use crate::application::config::EventConfig;
    use crate::domain::value_object::EventStatus;
    use crate::presentation::router::event_router_generic;

    fn app_as(store: &MemoryEventStore, caller: Option<Principal>) -> Router {
        let router = event_router_generic(store.clone(), EventConfig::default());
        match caller {
            Some(p) => router.layer(Extension(p)),
            None => router,
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_event_then_fetch() {
        let store = MemoryEventStore::default();
        let organizer = principal(&store, "Org", UserRole::Organizer);

        let (status, body) = send(
            app_as(&store, Some(organizer)),
            json_request(
                "POST",
                "/event",
                json!({
                    "name": "Robo Wars",
                    "category": "robotics",
                    "eventDate": "2026-03-01T09:00:00Z",
                    "registrationFee": 5000,
                    "maxParticipants": 40,
                    "maxTeamSize": 4
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["eventId"], 1);

        let (status, body) = send(app_as(&store, None), empty_request("GET", "/event/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["maxTeamSize"], 4);

        // Not approved yet, so not in the public catalogue.
        let (status, body) = send(app_as(&store, None), empty_request("GET", "/events")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_event_is_problem_404() {
        let store = MemoryEventStore::default();
        let (status, body) =
            send(app_as(&store, None), empty_request("GET", "/event/404")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Event not found");
    }

    #[tokio::test]
    async fn test_protected_route_without_principal_is_401() {
        let store = MemoryEventStore::default();
        let (status, _) = send(app_as(&store, None), empty_request("GET", "/my-events")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reject_without_body() {
        let store = MemoryEventStore::default();
        let admin = principal(&store, "Admin", UserRole::Admin);
        store.seed_event(admin.user_id, EventStatus::Pending, 10, 1);

        let (status, body) = send(
            app_as(&store, Some(admin.clone())),
            empty_request("PUT", "/event/1/reject"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "rejected");

        let (status, body) = send(
            app_as(&store, Some(admin)),
            empty_request("POST", "/event/accept/1"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Event is already rejected");
    }

    #[tokio::test]
    async fn test_participant_cannot_create_venue() {
        let store = MemoryEventStore::default();
        let participant = principal(&store, "Pat", UserRole::Participant);

        let (status, body) = send(
            app_as(&store, Some(participant)),
            json_request(
                "POST",
                "/venue",
                json!({"name": "Hall", "location": "B", "capacity": 100}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "This action requires the admin role");
    }

    #[tokio::test]
    async fn test_register_team_over_http() {
        let store = MemoryEventStore::default();
        let organizer = principal(&store, "Org", UserRole::Organizer);
        let lead = principal(&store, "Lead", UserRole::Participant);
        principal(&store, "Mate", UserRole::Participant);
        store.seed_event(organizer.user_id, EventStatus::Approved, 10, 2);

        let (status, body) = send(
            app_as(&store, Some(lead)),
            json_request(
                "POST",
                "/add-participants",
                json!({"eventId": 1, "memberEmails": ["mate@nu.edu.pk"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["teamId"].as_str().unwrap().len(), 21);
        assert_eq!(body["participantIds"], json!([1, 2]));

        let (status, body) = send(
            app_as(&store, Some(organizer)),
            empty_request("GET", "/event/1/participants"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["members"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_input_is_400_problem() {
        let store = MemoryEventStore::default();
        let admin = principal(&store, "Admin", UserRole::Admin);

        let (status, body) = send(
            app_as(&store, Some(admin.clone())),
            json_request("POST", "/venue", json!({"location": "B", "capacity": 100})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("name"));

        let (status, body) =
            send(app_as(&store, Some(admin)), empty_request("GET", "/event/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::domain::value_object::EventStatus;
    use crate::error::EventError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(EventError, StatusCode)> = vec![
            (EventError::EventNotFound, StatusCode::NOT_FOUND),
            (EventError::RoundNotFound, StatusCode::NOT_FOUND),
            (EventError::NotApproved, StatusCode::BAD_REQUEST),
            (EventError::TeamTooLarge { max: 3 }, StatusCode::BAD_REQUEST),
            (
                EventError::UnknownMember("x@y.z".into()),
                StatusCode::BAD_REQUEST,
            ),
            (EventError::AlreadyRegistered, StatusCode::BAD_REQUEST),
            (EventError::EventFull, StatusCode::BAD_REQUEST),
            (
                EventError::InvalidTransition(EventStatus::Approved),
                StatusCode::BAD_REQUEST,
            ),
            (EventError::DuplicateScore, StatusCode::BAD_REQUEST),
            (EventError::NotAssignedJudge, StatusCode::FORBIDDEN),
            (EventError::NotEventManager, StatusCode::FORBIDDEN),
            (
                EventError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status, "{error}");
            assert_eq!(error.into_response().status(), expected_status);
        }
    }
}
