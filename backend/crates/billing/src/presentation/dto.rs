//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AccommodationId, EventId, PaymentId, SponsorId, SponsorshipId, SponsorshipPackageId, UserId,
};
use kernel::team::TeamId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Accommodation, Payment, Sponsorship, SponsorshipPackage};
use crate::domain::value_object::{AccommodationStatus, PaymentPurpose};

// ============================================================================
// Accommodation
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationRequest {
    pub event_id: EventId,
    pub people_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationCreatedResponse {
    pub accommodation_id: AccommodationId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccommodationListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptAccommodationRequest {
    pub accommodation_id: AccommodationId,
    pub room_details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectAccommodationRequest {
    pub accommodation_id: AccommodationId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationResponse {
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

impl From<Accommodation> for AccommodationResponse {
    fn from(a: Accommodation) -> Self {
        Self {
            accommodation_id: a.accommodation_id,
            user_id: a.user_id,
            event_id: a.event_id,
            team_id: a.team_id,
            people_count: a.people_count,
            check_in: a.check_in,
            check_out: a.check_out,
            notes: a.notes,
            status: a.status,
            room_details: a.room_details,
            payment_status: a.payment_status,
            created_at: a.created_at,
        }
    }
}

// ============================================================================
// Sponsorship
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSponsorRequest {
    pub company_name: String,
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorCreatedResponse {
    pub sponsor_id: SponsorId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    pub amount: i64,
    pub benefits: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCreatedResponse {
    pub package_id: SponsorshipPackageId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub package_id: SponsorshipPackageId,
    pub name: String,
    pub amount: i64,
    pub benefits: Option<String>,
}

impl From<SponsorshipPackage> for PackageResponse {
    fn from(p: SponsorshipPackage) -> Self {
        Self {
            package_id: p.package_id,
            name: p.name,
            amount: p.amount,
            benefits: p.benefits,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSponsorshipRequest {
    pub package_id: SponsorshipPackageId,
    pub event_id: Option<EventId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorshipCreatedResponse {
    pub sponsorship_id: SponsorshipId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorshipResponse {
    pub sponsorship_id: SponsorshipId,
    pub sponsor_id: SponsorId,
    pub company_name: String,
    pub package_id: SponsorshipPackageId,
    pub package_name: String,
    pub amount: i64,
    pub event_id: Option<EventId>,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Sponsorship> for SponsorshipResponse {
    fn from(s: Sponsorship) -> Self {
        Self {
            sponsorship_id: s.sponsorship_id,
            sponsor_id: s.sponsor_id,
            company_name: s.company_name,
            package_id: s.package_id,
            package_name: s.package_name,
            amount: s.amount,
            event_id: s.event_id,
            payment_status: s.payment_status,
            created_at: s.created_at,
        }
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPaymentRequest {
    pub team_id: String,
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationPaymentRequest {
    pub accommodation_id: AccommodationId,
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorshipPaymentRequest {
    pub sponsorship_id: SponsorshipId,
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreatedResponse {
    pub payment_id: PaymentId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListQuery {
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub payment_id: PaymentId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
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

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            payment_id: p.payment_id,
            user_id: p.user_id,
            purpose: p.purpose,
            team_id: p.team_id,
            event_id: p.event_id,
            accommodation_id: p.accommodation_id,
            sponsorship_id: p.sponsorship_id,
            amount: p.amount,
            method: p.method,
            transaction_ref: p.transaction_ref,
            verified_status: p.verified_status,
            verified_by: p.verified_by,
            verified_at: p.verified_at,
            created_at: p.created_at,
        }
    }
}
