//! Payment submission and verification
//!
//! Users record a transfer (method and reference) against an event team,
//! an accepted accommodation request or a sponsorship. An admin later
//! verifies it, which marks the target as paid.

use std::sync::Arc;

use kernel::id::{AccommodationId, PaymentId, SponsorshipId};
use kernel::principal::Principal;
use kernel::role::UserRole;
use kernel::team::TeamId;

use crate::application::config::BillingConfig;
use crate::domain::entity::{NewPayment, Payment};
use crate::domain::repository::{
    AccommodationRepository, PaymentRepository, RegistrationLookup, SponsorRepository,
};
use crate::domain::value_object::{AccommodationStatus, PaymentPurpose};
use crate::error::{BillingError, BillingResult};

/// Fields common to every payment submission
pub struct PaymentDetails {
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
}

/// Validated form of [`PaymentDetails`]
struct CheckedDetails {
    amount: i64,
    method: String,
    transaction_ref: String,
}

fn check_details(config: &BillingConfig, details: PaymentDetails) -> BillingResult<CheckedDetails> {
    if details.amount <= 0 {
        return Err(BillingError::Validation(
            "amount must be greater than 0".to_string(),
        ));
    }
    let method = config
        .accept_method(&details.method)
        .ok_or_else(|| BillingError::UnsupportedMethod(details.method.trim().to_owned()))?;
    let transaction_ref = details.transaction_ref.trim().to_owned();
    if transaction_ref.is_empty() {
        return Err(BillingError::Validation(
            "transactionRef is required".to_string(),
        ));
    }
    Ok(CheckedDetails {
        amount: details.amount,
        method,
        transaction_ref,
    })
}

pub struct SubmitPaymentUseCase<R>
where
    R: RegistrationLookup + AccommodationRepository + SponsorRepository + PaymentRepository,
{
    repo: Arc<R>,
    config: Arc<BillingConfig>,
}

impl<R> SubmitPaymentUseCase<R>
where
    R: RegistrationLookup + AccommodationRepository + SponsorRepository + PaymentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BillingConfig>) -> Self {
        Self { repo, config }
    }

    /// Registration fee for a team. Any member may pay.
    pub async fn for_event(
        &self,
        principal: &Principal,
        team_id: &str,
        details: PaymentDetails,
    ) -> BillingResult<Payment> {
        let details = check_details(&self.config, details)?;
        let team_id = TeamId::parse_str(team_id)?;

        let team = self
            .repo
            .find_team(&team_id)
            .await?
            .ok_or(BillingError::TeamNotFound)?;
        if !team.members.contains(&principal.user_id) {
            return Err(BillingError::NotTeamMember);
        }
        if details.amount != team.registration_fee {
            return Err(BillingError::AmountMismatch {
                expected: team.registration_fee,
            });
        }
        if self.repo.has_verified_event_payment(&team_id).await? {
            return Err(BillingError::AlreadyPaid);
        }

        self.record(
            principal,
            NewPayment {
                user_id: principal.user_id,
                purpose: PaymentPurpose::Event,
                team_id: Some(team_id),
                event_id: Some(team.event_id),
                accommodation_id: None,
                sponsorship_id: None,
                amount: details.amount,
                method: details.method,
                transaction_ref: details.transaction_ref,
            },
        )
        .await
    }

    pub async fn for_accommodation(
        &self,
        principal: &Principal,
        accommodation_id: AccommodationId,
        details: PaymentDetails,
    ) -> BillingResult<Payment> {
        let details = check_details(&self.config, details)?;

        let accommodation = self
            .repo
            .find_accommodation(accommodation_id)
            .await?
            .ok_or(BillingError::AccommodationNotFound)?;
        if accommodation.user_id != principal.user_id {
            return Err(BillingError::NotOwner);
        }
        if accommodation.status != AccommodationStatus::Accepted {
            return Err(BillingError::AccommodationNotAccepted);
        }
        if accommodation.payment_status {
            return Err(BillingError::AlreadyPaid);
        }

        self.record(
            principal,
            NewPayment {
                user_id: principal.user_id,
                purpose: PaymentPurpose::Accommodation,
                team_id: accommodation.team_id,
                event_id: Some(accommodation.event_id),
                accommodation_id: Some(accommodation_id),
                sponsorship_id: None,
                amount: details.amount,
                method: details.method,
                transaction_ref: details.transaction_ref,
            },
        )
        .await
    }

    pub async fn for_sponsorship(
        &self,
        principal: &Principal,
        sponsorship_id: SponsorshipId,
        details: PaymentDetails,
    ) -> BillingResult<Payment> {
        let details = check_details(&self.config, details)?;

        let sponsorship = self
            .repo
            .find_sponsorship(sponsorship_id)
            .await?
            .ok_or(BillingError::SponsorshipNotFound)?;
        if sponsorship.sponsor_user_id != principal.user_id {
            return Err(BillingError::NotOwner);
        }
        if details.amount != sponsorship.amount {
            return Err(BillingError::AmountMismatch {
                expected: sponsorship.amount,
            });
        }
        if sponsorship.payment_status {
            return Err(BillingError::AlreadyPaid);
        }

        self.record(
            principal,
            NewPayment {
                user_id: principal.user_id,
                purpose: PaymentPurpose::Sponsorship,
                team_id: None,
                event_id: sponsorship.event_id,
                accommodation_id: None,
                sponsorship_id: Some(sponsorship_id),
                amount: details.amount,
                method: details.method,
                transaction_ref: details.transaction_ref,
            },
        )
        .await
    }

    async fn record(&self, principal: &Principal, payment: NewPayment) -> BillingResult<Payment> {
        let payment = self.repo.create_payment(&payment).await?;

        tracing::info!(
            payment_id = %payment.payment_id,
            purpose = %payment.purpose,
            amount = payment.amount,
            user_id = %principal.user_id,
            "Payment submitted for verification"
        );

        Ok(payment)
    }
}

pub struct PaymentQueriesUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> PaymentQueriesUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn mine(&self, principal: &Principal) -> BillingResult<Vec<Payment>> {
        self.repo.list_user_payments(principal.user_id).await
    }

    pub async fn all(&self, principal: &Principal, verified: Option<bool>) -> BillingResult<Vec<Payment>> {
        principal.require_role(&[UserRole::Admin])?;
        self.repo.list_payments(verified).await
    }
}

pub struct VerifyPaymentUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyPaymentUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal: &Principal, payment_id: PaymentId) -> BillingResult<Payment> {
        principal.require_role(&[UserRole::Admin])?;

        let payment = self
            .repo
            .find_payment(payment_id)
            .await?
            .ok_or(BillingError::PaymentNotFound)?;
        if payment.verified_status {
            return Err(BillingError::AlreadyVerified);
        }

        let verified = self
            .repo
            .verify_payment(payment_id, principal.user_id)
            .await?
            .ok_or(BillingError::AlreadyVerified)?;

        tracing::info!(
            payment_id = %payment_id,
            purpose = %verified.purpose,
            verified_by = %principal.user_id,
            "Payment verified"
        );

        Ok(verified)
    }
}
