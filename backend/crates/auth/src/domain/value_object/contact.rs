//! Contact Value Object
//!
//! Phone number or similar reachability hint. Only the characters a
//! phone number can contain are accepted.

use kernel::error::app_error::{AppError, AppResult};

const CONTACT_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact(String);

impl Contact {
    /// `None` for blank input, so the field stays optional.
    pub fn parse_optional(raw: Option<&str>) -> AppResult<Option<Self>> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        if raw.len() > CONTACT_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Contact must be at most {} characters",
                CONTACT_MAX_LENGTH
            )));
        }
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')');
        if !raw.chars().all(allowed) || !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("Contact must be a phone number"));
        }
        Ok(Some(Self(raw.to_owned())))
    }

    pub fn from_db(contact: String) -> Self {
        Self(contact)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
