//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{
    AccommodationId, EventId, PaymentId, SponsorshipId, SponsorshipPackageId, UserId,
};
use kernel::team::TeamId;

use crate::domain::entity::*;
use crate::domain::value_object::AccommodationStatus;
use crate::error::BillingResult;

/// Read-only view of event registrations
#[trait_variant::make(RegistrationLookup: Send)]
pub trait LocalRegistrationLookup {
    async fn event_exists(&self, event_id: EventId) -> BillingResult<bool>;

    /// The caller's team for the event, if registered
    async fn find_user_team(&self, event_id: EventId, user_id: UserId)
    -> BillingResult<Option<TeamId>>;

    async fn find_team(&self, team_id: &TeamId) -> BillingResult<Option<TeamBilling>>;
}

#[trait_variant::make(AccommodationRepository: Send)]
pub trait LocalAccommodationRepository {
    async fn create_accommodation(&self, request: &NewAccommodation) -> BillingResult<Accommodation>;

    async fn find_accommodation(
        &self,
        accommodation_id: AccommodationId,
    ) -> BillingResult<Option<Accommodation>>;

    async fn list_user_accommodations(&self, user_id: UserId) -> BillingResult<Vec<Accommodation>>;

    async fn list_accommodations(
        &self,
        status: Option<AccommodationStatus>,
    ) -> BillingResult<Vec<Accommodation>>;

    /// Move a pending request to `to`. `None` when it was no longer pending.
    async fn decide_accommodation(
        &self,
        accommodation_id: AccommodationId,
        to: AccommodationStatus,
        room_details: Option<&str>,
    ) -> BillingResult<Option<Accommodation>>;
}

#[trait_variant::make(SponsorRepository: Send)]
pub trait LocalSponsorRepository {
    /// Fails with `SponsorProfileExists` when the user already has one
    async fn create_sponsor(&self, sponsor: &NewSponsor) -> BillingResult<Sponsor>;

    async fn find_sponsor_by_user(&self, user_id: UserId) -> BillingResult<Option<Sponsor>>;

    /// Fails with `PackageNameTaken` on a duplicate name
    async fn create_package(&self, package: &NewPackage) -> BillingResult<SponsorshipPackage>;

    async fn find_package(
        &self,
        package_id: SponsorshipPackageId,
    ) -> BillingResult<Option<SponsorshipPackage>>;

    async fn list_packages(&self) -> BillingResult<Vec<SponsorshipPackage>>;

    async fn create_sponsorship(&self, sponsorship: &NewSponsorship) -> BillingResult<Sponsorship>;

    async fn find_sponsorship(
        &self,
        sponsorship_id: SponsorshipId,
    ) -> BillingResult<Option<Sponsorship>>;

    /// All sponsorships, or only those of one sponsor user
    async fn list_sponsorships(&self, sponsor_user_id: Option<UserId>)
    -> BillingResult<Vec<Sponsorship>>;
}

#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create_payment(&self, payment: &NewPayment) -> BillingResult<Payment>;

    async fn find_payment(&self, payment_id: PaymentId) -> BillingResult<Option<Payment>>;

    async fn has_verified_event_payment(&self, team_id: &TeamId) -> BillingResult<bool>;

    async fn list_user_payments(&self, user_id: UserId) -> BillingResult<Vec<Payment>>;

    async fn list_payments(&self, verified: Option<bool>) -> BillingResult<Vec<Payment>>;

    /// Mark the payment verified and its target paid, atomically.
    ///
    /// `None` when the payment was already verified.
    async fn verify_payment(
        &self,
        payment_id: PaymentId,
        verified_by: UserId,
    ) -> BillingResult<Option<Payment>>;
}

/// Everything the billing handlers need from one store
pub trait BillingStore:
    RegistrationLookup
    + AccommodationRepository
    + SponsorRepository
    + PaymentRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> BillingStore for T where
    T: RegistrationLookup
        + AccommodationRepository
        + SponsorRepository
        + PaymentRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
