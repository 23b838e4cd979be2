//! Team identifier
//!
//! Teams have no table. A [`TeamId`] is generated once per team
//! registration, stamped on every participant row of that team and later
//! reused as the join key for payments and scores.

use std::fmt;
use std::str::FromStr;

use nid::Nanoid;
use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};

/// Random, URL-safe, 21 character identifier shared by one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Nanoid);

impl TeamId {
    /// Fresh id for a new team.
    #[inline]
    pub fn generate() -> Self {
        Self(Nanoid::new())
    }

    /// Parse a team id received from a client or read back from the database.
    pub fn parse_str(s: &str) -> AppResult<Self> {
        Nanoid::from_str(s.trim())
            .map(Self)
            .map_err(|e| AppError::bad_request(format!("Invalid team id: {}", e)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TeamId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        TeamId::parse_str(s)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for TeamId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TeamId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = TeamId::generate();
        let b = TeamId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 21);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = TeamId::generate();
        let parsed = TeamId::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TeamId::parse_str("short").is_err());
        assert!(TeamId::parse_str("").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = TeamId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
