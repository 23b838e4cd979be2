//! Sponsors, packages and sponsorships

use std::sync::Arc;

use kernel::id::{EventId, SponsorshipPackageId};
use kernel::principal::Principal;
use kernel::role::UserRole;

use crate::application::non_blank;
use crate::domain::entity::{
    NewPackage, NewSponsor, NewSponsorship, Sponsor, Sponsorship, SponsorshipPackage,
};
use crate::domain::repository::{RegistrationLookup, SponsorRepository};
use crate::error::{BillingError, BillingResult};

pub struct SponsorProfileUseCase<R>
where
    R: SponsorRepository,
{
    repo: Arc<R>,
}

impl<R> SponsorProfileUseCase<R>
where
    R: SponsorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        company_name: String,
        contact_person: Option<String>,
    ) -> BillingResult<Sponsor> {
        principal.require_role(&[UserRole::Sponsor])?;

        let company_name = company_name.trim().to_owned();
        if company_name.is_empty() {
            return Err(BillingError::Validation(
                "companyName is required".to_string(),
            ));
        }
        if self
            .repo
            .find_sponsor_by_user(principal.user_id)
            .await?
            .is_some()
        {
            return Err(BillingError::SponsorProfileExists);
        }

        let sponsor = self
            .repo
            .create_sponsor(&NewSponsor {
                user_id: principal.user_id,
                company_name,
                contact_person: non_blank(contact_person),
            })
            .await?;

        tracing::info!(sponsor_id = %sponsor.sponsor_id, "Sponsor profile created");
        Ok(sponsor)
    }
}

pub struct PackagesUseCase<R>
where
    R: SponsorRepository,
{
    repo: Arc<R>,
}

impl<R> PackagesUseCase<R>
where
    R: SponsorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> BillingResult<Vec<SponsorshipPackage>> {
        self.repo.list_packages().await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        name: String,
        amount: i64,
        benefits: Option<String>,
    ) -> BillingResult<SponsorshipPackage> {
        principal.require_role(&[UserRole::Admin])?;

        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(BillingError::Validation("name is required".to_string()));
        }
        if amount <= 0 {
            return Err(BillingError::Validation(
                "amount must be greater than 0".to_string(),
            ));
        }

        let package = self
            .repo
            .create_package(&NewPackage {
                name,
                amount,
                benefits: non_blank(benefits),
            })
            .await?;

        tracing::info!(package_id = %package.package_id, "Sponsorship package created");
        Ok(package)
    }
}

pub struct CreateSponsorshipUseCase<R>
where
    R: SponsorRepository + RegistrationLookup,
{
    repo: Arc<R>,
}

impl<R> CreateSponsorshipUseCase<R>
where
    R: SponsorRepository + RegistrationLookup,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        package_id: SponsorshipPackageId,
        event_id: Option<EventId>,
    ) -> BillingResult<Sponsorship> {
        principal.require_role(&[UserRole::Sponsor])?;

        let sponsor = self
            .repo
            .find_sponsor_by_user(principal.user_id)
            .await?
            .ok_or(BillingError::SponsorProfileMissing)?;
        if self.repo.find_package(package_id).await?.is_none() {
            return Err(BillingError::PackageNotFound);
        }
        if let Some(event_id) = event_id {
            if !self.repo.event_exists(event_id).await? {
                return Err(BillingError::EventNotFound);
            }
        }

        let sponsorship = self
            .repo
            .create_sponsorship(&NewSponsorship {
                sponsor_id: sponsor.sponsor_id,
                package_id,
                event_id,
            })
            .await?;

        tracing::info!(
            sponsorship_id = %sponsorship.sponsorship_id,
            sponsor_id = %sponsor.sponsor_id,
            "Sponsorship created"
        );
        Ok(sponsorship)
    }
}

pub struct SponsorshipQueriesUseCase<R>
where
    R: SponsorRepository,
{
    repo: Arc<R>,
}

impl<R> SponsorshipQueriesUseCase<R>
where
    R: SponsorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn mine(&self, principal: &Principal) -> BillingResult<Vec<Sponsorship>> {
        principal.require_role(&[UserRole::Sponsor])?;
        self.repo.list_sponsorships(Some(principal.user_id)).await
    }

    pub async fn all(&self, principal: &Principal) -> BillingResult<Vec<Sponsorship>> {
        principal.require_role(&[UserRole::Admin])?;
        self.repo.list_sponsorships(None).await
    }
}
