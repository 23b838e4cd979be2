//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` problem document.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token unknown or expired
    #[error("Token is invalid or has expired")]
    TokenInvalid,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Role '{0}' cannot be chosen at registration")]
    RoleNotSelfAssignable(String),

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Error raised by shared kernel helpers (role checks, parsing)
    #[error(transparent)]
    App(#[from] AppError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::RoleNotSelfAssignable(_) => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::App(e) => e.kind(),
        }
    }

    /// Client-facing form. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) => AppError::internal("Database error"),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string()),
            AuthError::TokenInvalid => AppError::unauthorized(self.to_string())
                .with_action("Log in again to obtain a new token"),
            AuthError::App(e) => {
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
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Request with invalid or expired bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
