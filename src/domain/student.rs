//! Student records as held by the registration store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StudentId;

/// A registered student.
///
/// Created by [`super::StudentStore::insert`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Sequential identifier, starting at 1.
    pub id: StudentId,
    /// Full name as submitted.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address, unique across all records (case-sensitive).
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Grade level.
    #[schema(example = 9)]
    pub grade: i64,
}

/// Registration input that already passed presence validation.
///
/// The only way to obtain one from client input is
/// [`crate::api::dto::RegistrationRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Grade level (never zero).
    pub grade: i64,
}

impl NewStudent {
    /// Builds the stored record under the given id.
    #[must_use]
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            grade: self.grade,
        }
    }
}
