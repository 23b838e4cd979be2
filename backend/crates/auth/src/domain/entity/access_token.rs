//! Access Token Entity
//!
//! Bearer tokens are random hex strings handed to the client once.
//! Only their SHA-256 digest is persisted, so a leaked `tokens` table
//! cannot be replayed.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto::{random_token, sha256_hex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token_hash: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Mint a token for `user_id`. Returns the clear token and the
    /// record to store.
    pub fn issue(user_id: UserId, ttl: Duration) -> (String, Self) {
        let token = random_token();
        let now = Utc::now();
        let record = Self {
            token_hash: Self::digest(&token),
            user_id,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        (token, record)
    }

    /// Digest under which a clear token is looked up.
    #[inline]
    pub fn digest(token: &str) -> String {
        sha256_hex(token.as_bytes())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_issue_stores_digest_only() {
        let (token, record) = AccessToken::issue(Id::new(9), Duration::hours(1));
        assert_ne!(record.token_hash, token);
        assert_eq!(record.token_hash, AccessToken::digest(&token));
        assert_eq!(record.user_id.get(), 9);
    }

    #[test]
    fn test_expiry() {
        let (_, record) = AccessToken::issue(Id::new(1), Duration::minutes(5));
        assert!(!record.is_expired_at(Utc::now()));
        assert!(record.is_expired_at(Utc::now() + Duration::minutes(6)));
    }

    #[test]
    fn test_out_of_range_ttl_saturates() {
        let (_, record) = AccessToken::issue(Id::new(1), Duration::days(100_000_000));
        assert_eq!(record.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!record.is_expired_at(Utc::now()));
    }
}
