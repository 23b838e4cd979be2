//! Event Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::EventStatus;

pub type EventResult<T> = Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    // ---- 404 ----
    #[error("Event not found")]
    EventNotFound,

    #[error("Venue not found")]
    VenueNotFound,

    #[error("Round not found")]
    RoundNotFound,

    #[error("User not found")]
    UserNotFound,

    // ---- 400 ----
    #[error("{0}")]
    Validation(String),

    #[error("Event is not open for registration")]
    NotApproved,

    #[error("Team exceeds the maximum size of {max}")]
    TeamTooLarge { max: i32 },

    #[error("No user is registered with email {0}")]
    UnknownMember(String),

    #[error("{0} is not a participant account")]
    MemberNotParticipant(String),

    #[error("User does not have the judge role")]
    NotJudgeRole,

    #[error("Team is not registered for this event")]
    TeamNotRegistered,

    #[error("Score must be between {min} and {max}")]
    ScoreOutOfRange { min: i32, max: i32 },

    // ---- 400, state ----
    #[error("A team member is already registered for this event")]
    AlreadyRegistered,

    #[error("Event is full")]
    EventFull,

    #[error("Event is already {0}")]
    InvalidTransition(EventStatus),

    #[error("Judge is already assigned to this event")]
    JudgeAlreadyAssigned,

    #[error("Score already submitted for this team in this round")]
    DuplicateScore,

    // ---- 403 ----
    #[error("You are not assigned to judge this event")]
    NotAssignedJudge,

    #[error("Only the event organizer or an admin may do this")]
    NotEventManager,

    // ---- 500 ----
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl EventError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::EventNotFound
            | EventError::VenueNotFound
            | EventError::RoundNotFound
            | EventError::UserNotFound => ErrorKind::NotFound,
            EventError::Validation(_)
            | EventError::NotApproved
            | EventError::TeamTooLarge { .. }
            | EventError::UnknownMember(_)
            | EventError::MemberNotParticipant(_)
            | EventError::NotJudgeRole
            | EventError::TeamNotRegistered
            | EventError::ScoreOutOfRange { .. }
            | EventError::AlreadyRegistered
            | EventError::EventFull
            | EventError::InvalidTransition(_)
            | EventError::JudgeAlreadyAssigned
            | EventError::DuplicateScore => ErrorKind::BadRequest,
            EventError::NotAssignedJudge | EventError::NotEventManager => ErrorKind::Forbidden,
            EventError::Database(_) | EventError::Internal(_) => ErrorKind::InternalServerError,
            EventError::App(e) => e.kind(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            EventError::Database(_) => AppError::internal("Database error"),
            EventError::Internal(_) => AppError::internal("Internal server error"),
            EventError::App(e) => {
                let err = AppError::new(e.kind(), e.message().to_owned());
                match e.action() {
                    Some(action) => err.with_action(action.to_owned()),
                    None => err,
                }
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            EventError::Database(e) => {
                tracing::error!(error = %e, "Event database error");
            }
            EventError::Internal(msg) => {
                tracing::error!(message = %msg, "Event internal error");
            }
            EventError::NotAssignedJudge => {
                tracing::warn!("Score submitted by a judge not assigned to the event");
            }
            _ => {
                tracing::debug!(error = %self, "Event error");
            }
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
