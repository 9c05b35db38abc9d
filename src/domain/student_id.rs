//! Type-safe student identifier.
//!
//! [`StudentId`] is a newtype over the sequential integer assigned by the
//! [`super::StudentStore`] at registration time, so that student ids cannot
//! be confused with grades or list positions.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a registered student.
///
/// Ids start at `1` and are dense: the n-th registered student has id `n`.
/// Assigned once by the store and immutable thereafter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct StudentId(u64);

impl StudentId {
    /// Creates a `StudentId` from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StudentId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<StudentId> for u64 {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&StudentId::new(7)).unwrap_or_default();
        assert_eq!(json, "7");
    }

    #[test]
    fn deserializes_from_integer() {
        let Ok(id) = serde_json::from_str::<StudentId>("42") else {
            panic!("deserialization failed");
        };
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(StudentId::from(12).to_string(), "12");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(StudentId::new(1) < StudentId::new(2));
        assert_eq!(u64::from(StudentId::new(3)), 3);
    }
}
