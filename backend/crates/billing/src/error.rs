//! Billing Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::AccommodationStatus;

pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum BillingError {
    // ---- 404 ----
    #[error("Event not found")]
    EventNotFound,

    #[error("Team not found")]
    TeamNotFound,

    #[error("Accommodation request not found")]
    AccommodationNotFound,

    #[error("Sponsorship package not found")]
    PackageNotFound,

    #[error("Sponsorship not found")]
    SponsorshipNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    // ---- 400 ----
    #[error("{0}")]
    Validation(String),

    #[error("You are not registered for this event")]
    NotRegistered,

    #[error("Create a sponsor profile first")]
    SponsorProfileMissing,

    #[error("Amount must equal {expected}")]
    AmountMismatch { expected: i64 },

    #[error("Payment method '{0}' is not accepted")]
    UnsupportedMethod(String),

    #[error("Accommodation request has not been accepted")]
    AccommodationNotAccepted,

    // ---- 403 ----
    #[error("You are not a member of this team")]
    NotTeamMember,

    #[error("This record belongs to another user")]
    NotOwner,

    // ---- 400, state ----
    #[error("Sponsor profile already exists")]
    SponsorProfileExists,

    #[error("A package with this name already exists")]
    PackageNameTaken,

    #[error("Accommodation request is already {0}")]
    InvalidTransition(AccommodationStatus),

    #[error("Already paid")]
    AlreadyPaid,

    #[error("Payment is already verified")]
    AlreadyVerified,

    // ---- 500 ----
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl BillingError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::EventNotFound
            | BillingError::TeamNotFound
            | BillingError::AccommodationNotFound
            | BillingError::PackageNotFound
            | BillingError::SponsorshipNotFound
            | BillingError::PaymentNotFound => ErrorKind::NotFound,
            BillingError::Validation(_)
            | BillingError::NotRegistered
            | BillingError::SponsorProfileMissing
            | BillingError::AmountMismatch { .. }
            | BillingError::UnsupportedMethod(_)
            | BillingError::AccommodationNotAccepted
            | BillingError::SponsorProfileExists
            | BillingError::PackageNameTaken
            | BillingError::InvalidTransition(_)
            | BillingError::AlreadyPaid
            | BillingError::AlreadyVerified => ErrorKind::BadRequest,
            BillingError::NotTeamMember | BillingError::NotOwner => ErrorKind::Forbidden,
            BillingError::Database(_) | BillingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            BillingError::App(e) => e.kind(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BillingError::Database(_) => AppError::internal("Database error"),
            BillingError::Internal(_) => AppError::internal("Internal server error"),
            BillingError::App(e) => {
                let err = AppError::new(e.kind(), e.message().to_owned());
                match e.action() {
                    Some(action) => err.with_action(action.to_owned()),
                    None => err,
                }
            }
            BillingError::SponsorProfileMissing => AppError::bad_request(self.to_string())
                .with_action("POST /sponsor with your company details"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BillingError::Database(e) => {
                tracing::error!(error = %e, "Billing database error");
            }
            BillingError::Internal(msg) => {
                tracing::error!(message = %msg, "Billing internal error");
            }
            BillingError::NotTeamMember | BillingError::NotOwner => {
                tracing::warn!(error = %self, "Payment attempted for someone else's record");
            }
            _ => {
                tracing::debug!(error = %self, "Billing error");
            }
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
