//! Typed IDs
//!
//! Every table uses a `BIGSERIAL` key. [`Id<T>`] keeps the raw `i64`
//! but stops a venue id from being passed where an event id is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{EventId, Id};
///
/// let id: EventId = Id::new(42);
/// assert_eq!(id.get(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so that the marker type needs no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types, one per table
pub mod markers {
    pub struct User;
    pub struct Venue;
    pub struct Event;
    pub struct Round;
    pub struct Participant;
    pub struct Judge;
    pub struct Score;
    pub struct Accommodation;
    pub struct Payment;
    pub struct Sponsor;
    pub struct SponsorshipPackage;
    pub struct Sponsorship;
}

pub type UserId = Id<markers::User>;
pub type VenueId = Id<markers::Venue>;
pub type EventId = Id<markers::Event>;
pub type RoundId = Id<markers::Round>;
pub type ParticipantId = Id<markers::Participant>;
pub type JudgeId = Id<markers::Judge>;
pub type ScoreId = Id<markers::Score>;
pub type AccommodationId = Id<markers::Accommodation>;
pub type PaymentId = Id<markers::Payment>;
pub type SponsorId = Id<markers::Sponsor>;
pub type SponsorshipPackageId = Id<markers::SponsorshipPackage>;
pub type SponsorshipId = Id<markers::Sponsorship>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_as_plain_number() {
        let id: EventId = Id::new(17);
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");

        let back: EventId = serde_json::from_str("17").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_from_path_segment() {
        let id: RoundId = "305".parse().unwrap();
        assert_eq!(id.get(), 305);
        assert!("abc".parse::<RoundId>().is_err());
    }

    #[test]
    fn test_id_ordering_follows_value() {
        let mut ids: Vec<UserId> = vec![Id::new(3), Id::new(1), Id::new(2)];
        ids.sort();
        assert_eq!(ids.iter().map(|i| i.get()).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
