//! Domain events reflecting registration store mutations.
//!
//! Every successful registration emits a [`RegistryEvent`] through the
//! [`super::EventBus`]. Events are forwarded to live-feed subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Student, StudentId};

/// Domain event emitted after every store mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// Emitted when a new student has been stored.
    StudentRegistered {
        /// The stored record, including its assigned id.
        student: Student,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// Returns the id of the student this event concerns.
    #[must_use]
    pub fn student_id(&self) -> StudentId {
        match self {
            Self::StudentRegistered { student, .. } => student.id,
        }
    }

    /// Returns the grade of the student this event concerns.
    #[must_use]
    pub fn grade(&self) -> i64 {
        match self {
            Self::StudentRegistered { student, .. } => student.grade,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::StudentRegistered { .. } => "student_registered",
        }
    }
}
