//! Team registration
//!
//! The caller registers a team for an approved event by listing teammate
//! emails. The caller is always on the team. Every member row shares one
//! freshly generated team id.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use kernel::id::{EventId, ParticipantId};
use kernel::principal::Principal;
use kernel::role::UserRole;
use kernel::team::TeamId;

use crate::domain::entity::{NewRegistration, ParticipantEntry, UserRegistration};
use crate::domain::repository::{EventRepository, MemberDirectory, RegistrationRepository};
use crate::error::{EventError, EventResult};

pub struct RegisterTeamInput {
    pub event_id: EventId,
    pub member_emails: Vec<String>,
}

#[derive(Debug)]
pub struct RegisterTeamOutput {
    pub team_id: TeamId,
    pub participant_ids: Vec<ParticipantId>,
}

pub struct RegisterTeamUseCase<R>
where
    R: EventRepository + MemberDirectory + RegistrationRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterTeamUseCase<R>
where
    R: EventRepository + MemberDirectory + RegistrationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: RegisterTeamInput,
    ) -> EventResult<RegisterTeamOutput> {
        principal.require_role(&[UserRole::Participant])?;

        let event = self
            .repo
            .find_event(input.event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;
        if !event.is_open_for_registration() {
            return Err(EventError::NotApproved);
        }

        let emails = team_emails(&principal.email, input.member_emails)?;
        if emails.len() > event.max_team_size as usize {
            return Err(EventError::TeamTooLarge {
                max: event.max_team_size,
            });
        }

        let found = self.repo.find_members_by_emails(&emails).await?;
        let mut members = Vec::with_capacity(emails.len());
        for email in &emails {
            let member = found
                .iter()
                .find(|m| m.email.eq_ignore_ascii_case(email))
                .ok_or_else(|| EventError::UnknownMember(email.clone()))?;
            if member.role != UserRole::Participant {
                return Err(EventError::MemberNotParticipant(email.clone()));
            }
            members.push(member.user_id);
        }

        let already = self
            .repo
            .find_registered_users(event.event_id, &members)
            .await?;
        if !already.is_empty() {
            return Err(EventError::AlreadyRegistered);
        }

        let team_id = TeamId::generate();
        let participant_ids = self
            .repo
            .register_team(&NewRegistration {
                event_id: event.event_id,
                team_id,
                members,
            })
            .await?;

        tracing::info!(
            event_id = %event.event_id,
            team_id = %team_id,
            team_size = participant_ids.len(),
            "Team registered"
        );

        Ok(RegisterTeamOutput {
            team_id,
            participant_ids,
        })
    }
}

/// Normalized team email list with the caller first.
///
/// Listing yourself is allowed; listing anyone twice is not.
fn team_emails(caller: &str, listed: Vec<String>) -> EventResult<Vec<String>> {
    let caller = caller.trim().to_lowercase();
    let mut seen = HashSet::new();
    let mut emails = vec![caller.clone()];

    for raw in listed {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(EventError::Validation(
                "memberEmails cannot contain blank entries".to_string(),
            ));
        }
        if !seen.insert(email.clone()) {
            return Err(EventError::Validation(format!(
                "{} is listed more than once",
                email
            )));
        }
        if email != caller {
            emails.push(email);
        }
    }

    Ok(emails)
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone)]
pub struct TeamRoster {
    pub team_id: TeamId,
    /// True once every member row is marked paid
    pub payment_status: bool,
    pub members: Vec<ParticipantEntry>,
}

pub struct EventParticipantsUseCase<R>
where
    R: EventRepository + RegistrationRepository,
{
    repo: Arc<R>,
}

impl<R> EventParticipantsUseCase<R>
where
    R: EventRepository + RegistrationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal, event_id: EventId) -> EventResult<Vec<TeamRoster>> {
        let event = self
            .repo
            .find_event(event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;
        event.ensure_manager(principal)?;

        let participants = self.repo.list_participants(event_id).await?;
        Ok(group_by_team(participants))
    }
}

pub(crate) fn group_by_team(participants: Vec<ParticipantEntry>) -> Vec<TeamRoster> {
    let mut teams: BTreeMap<TeamId, Vec<ParticipantEntry>> = BTreeMap::new();
    for entry in participants {
        teams.entry(entry.team_id).or_default().push(entry);
    }

    teams
        .into_iter()
        .map(|(team_id, members)| TeamRoster {
            team_id,
            payment_status: members.iter().all(|m| m.payment_status),
            members,
        })
        .collect()
}

pub struct MyRegistrationsUseCase<R>
where
    R: RegistrationRepository,
{
    repo: Arc<R>,
}

impl<R> MyRegistrationsUseCase<R>
where
    R: RegistrationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal) -> EventResult<Vec<UserRegistration>> {
        self.repo.list_user_registrations(principal.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_is_prepended() {
        let emails = team_emails("Me@Nu.edu.pk", vec!["a@nu.edu.pk".into()]).unwrap();
        assert_eq!(emails, vec!["me@nu.edu.pk", "a@nu.edu.pk"]);
    }

    #[test]
    fn test_listing_self_is_not_a_duplicate() {
        let emails = team_emails("me@nu.edu.pk", vec![" ME@nu.edu.pk ".into()]).unwrap();
        assert_eq!(emails, vec!["me@nu.edu.pk"]);
    }

    #[test]
    fn test_duplicates_and_blanks_rejected() {
        let dup = team_emails(
            "me@nu.edu.pk",
            vec!["a@nu.edu.pk".into(), "A@nu.edu.pk".into()],
        );
        assert!(matches!(dup, Err(EventError::Validation(_))));

        let blank = team_emails("me@nu.edu.pk", vec!["  ".into()]);
        assert!(matches!(blank, Err(EventError::Validation(_))));
    }
}
