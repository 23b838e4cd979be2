//! Billing value objects

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};

/// `pending -> accepted | rejected`; both outcomes are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl AccommodationStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            AccommodationStatus::Pending => "pending",
            AccommodationStatus::Accepted => "accepted",
            AccommodationStatus::Rejected => "rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(AccommodationStatus::Pending),
            "accepted" => Some(AccommodationStatus::Accepted),
            "rejected" => Some(AccommodationStatus::Rejected),
            _ => None,
        }
    }

    /// Parse a client-supplied filter value.
    pub fn parse_filter(code: &str) -> BillingResult<Self> {
        Self::from_code(&code.trim().to_lowercase()).ok_or_else(|| {
            BillingError::Validation(format!(
                "status must be one of pending, accepted, rejected (got '{}')",
                code
            ))
        })
    }

    pub fn can_transition_to(&self, next: AccommodationStatus) -> bool {
        *self == AccommodationStatus::Pending && next != AccommodationStatus::Pending
    }
}

impl fmt::Display for AccommodationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What a payment pays for. Decides which rows verification marks as paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPurpose {
    Event,
    Accommodation,
    Sponsorship,
}

impl PaymentPurpose {
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentPurpose::Event => "event",
            PaymentPurpose::Accommodation => "accommodation",
            PaymentPurpose::Sponsorship => "sponsorship",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "event" => Some(PaymentPurpose::Event),
            "accommodation" => Some(PaymentPurpose::Accommodation),
            "sponsorship" => Some(PaymentPurpose::Sponsorship),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
