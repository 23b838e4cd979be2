//! User Password Value Object
//!
//! Thin domain wrapper over `platform::password` that turns policy
//! failures into `AuthError::PasswordValidation`.

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Apply the registration policy.
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))
    }

    /// Accept anything for a login attempt; the stored hash decides.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub fn hash(&self, pepper: Option<&[u8]>) -> AuthResult<HashedPassword> {
        self.0
            .hash(pepper)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn matches(&self, stored: &HashedPassword, pepper: Option<&[u8]>) -> bool {
        stored.verify(&self.0, pepper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_maps_to_password_validation() {
        let err = RawPassword::new("short".to_string()).err().unwrap();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }

    #[test]
    fn test_hash_then_match() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        let stored = raw.hash(None).unwrap();
        assert!(RawPassword::for_login("correct horse".to_string()).matches(&stored, None));
        assert!(!RawPassword::for_login("wrong horse".to_string()).matches(&stored, None));
    }
}
