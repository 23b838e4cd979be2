//! User Role
//!
//! Stored as a plain lowercase string in `users.role`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Organizer,
    #[default]
    Participant,
    Judge,
    Sponsor,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Organizer,
        UserRole::Participant,
        UserRole::Judge,
        UserRole::Sponsor,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Organizer => "organizer",
            Participant => "participant",
            Judge => "judge",
            Sponsor => "sponsor",
        }
    }

    /// Parse a stored or submitted role code. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Roles a visitor may pick for themselves at registration.
    #[inline]
    pub const fn is_self_assignable(&self) -> bool {
        !matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            AppError::bad_request(format!("Unknown role: {}", s))
                .with_action("Use one of admin, organizer, participant, judge, sponsor")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
    }

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(UserRole::from_code(" Judge "), Some(UserRole::Judge));
        assert_eq!(UserRole::from_code("superuser"), None);
    }

    #[test]
    fn test_from_str_error_is_bad_request() {
        let err = "root".parse::<UserRole>().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_only_admin_is_not_self_assignable() {
        assert!(!UserRole::Admin.is_self_assignable());
        assert!(UserRole::Sponsor.is_self_assignable());
        assert!(UserRole::Participant.is_self_assignable());
    }
}
