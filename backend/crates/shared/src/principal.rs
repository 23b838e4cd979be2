//! Authenticated principal
//!
//! The bearer middleware in the `auth` crate resolves a token to a
//! [`Principal`] and stores it in the request extensions. Handlers in every
//! context take it as an extractor; a request without one is rejected
//! with 401.

use serde::Serialize;

use crate::error::app_error::{AppError, AppResult};
use crate::id::UserId;
use crate::role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl Principal {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 403 unless the principal holds one of `allowed`.
    pub fn require_role(&self, allowed: &[UserRole]) -> AppResult<()> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        let expected = allowed
            .iter()
            .map(UserRole::code)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(AppError::forbidden(format!(
            "This action requires the {} role",
            expected
        )))
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            AppError::unauthorized("Authentication required")
                .with_action("Log in and send the token as 'Authorization: Bearer <token>'")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;

    fn principal(role: UserRole) -> Principal {
        Principal {
            user_id: Id::new(1),
            name: "Ayesha".to_string(),
            email: "ayesha@nu.edu.pk".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_role_allows_listed_role() {
        let p = principal(UserRole::Organizer);
        assert!(p.require_role(&[UserRole::Organizer, UserRole::Admin]).is_ok());
    }

    #[test]
    fn test_require_role_rejects_with_403() {
        let p = principal(UserRole::Participant);
        let err = p.require_role(&[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(err.message().contains("admin"));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_extractor_without_principal_is_401() {
        use axum::extract::FromRequestParts;

        let (mut parts, _) = http::Request::new(()).into_parts();
        let err = Principal::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_extractor_reads_extension() {
        use axum::extract::FromRequestParts;

        let (mut parts, _) = http::Request::new(()).into_parts();
        parts.extensions.insert(principal(UserRole::Judge));
        let p = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(p.role, UserRole::Judge);
    }
}
