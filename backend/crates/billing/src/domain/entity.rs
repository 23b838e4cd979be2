//! Billing entities

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AccommodationId, EventId, PaymentId, SponsorId, SponsorshipId, SponsorshipPackageId, UserId,
};
use kernel::team::TeamId;

use crate::domain::value_object::{AccommodationStatus, PaymentPurpose};

// ============================================================================
// Accommodation
// ============================================================================

#[derive(Debug, Clone)]
pub struct Accommodation {
    pub accommodation_id: AccommodationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub team_id: Option<TeamId>,
    pub people_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub notes: Option<String>,
    pub status: AccommodationStatus,
    pub room_details: Option<String>,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccommodation {
    pub user_id: UserId,
    pub event_id: EventId,
    pub team_id: Option<TeamId>,
    pub people_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub notes: Option<String>,
}

// ============================================================================
// Sponsorship
// ============================================================================

#[derive(Debug, Clone)]
pub struct Sponsor {
    pub sponsor_id: SponsorId,
    pub user_id: UserId,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSponsor {
    pub user_id: UserId,
    pub company_name: String,
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SponsorshipPackage {
    pub package_id: SponsorshipPackageId,
    pub name: String,
    pub amount: i64,
    pub benefits: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub name: String,
    pub amount: i64,
    pub benefits: Option<String>,
}

/// A sponsorship joined with its sponsor and package
#[derive(Debug, Clone)]
pub struct Sponsorship {
    pub sponsorship_id: SponsorshipId,
    pub sponsor_id: SponsorId,
    /// Owner of the sponsor profile
    pub sponsor_user_id: UserId,
    pub company_name: String,
    pub package_id: SponsorshipPackageId,
    pub package_name: String,
    pub amount: i64,
    pub event_id: Option<EventId>,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSponsorship {
    pub sponsor_id: SponsorId,
    pub package_id: SponsorshipPackageId,
    pub event_id: Option<EventId>,
}

// ============================================================================
// Payments
// ============================================================================

/// Registration data needed to price and authorize an event payment
#[derive(Debug, Clone)]
pub struct TeamBilling {
    pub team_id: TeamId,
    pub event_id: EventId,
    pub registration_fee: i64,
    pub members: Vec<UserId>,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub user_id: UserId,
    pub purpose: PaymentPurpose,
    pub team_id: Option<TeamId>,
    pub event_id: Option<EventId>,
    pub accommodation_id: Option<AccommodationId>,
    pub sponsorship_id: Option<SponsorshipId>,
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
    pub verified_status: bool,
    pub verified_by: Option<UserId>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: UserId,
    pub purpose: PaymentPurpose,
    pub team_id: Option<TeamId>,
    pub event_id: Option<EventId>,
    pub accommodation_id: Option<AccommodationId>,
    pub sponsorship_id: Option<SponsorshipId>,
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
}
