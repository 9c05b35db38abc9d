//! Registration service: orchestrates store operations and emits events.

use std::sync::Arc;

use crate::api::dto::RegistrationRequest;
use crate::domain::{EventBus, Student, StudentId, StudentStore};
use crate::error::RegistryError;

/// Orchestration layer for all registration operations.
///
/// Stateless coordinator: owns references to [`StudentStore`] for state
/// and [`EventBus`] for event emission. Registration follows the pattern:
/// validate → insert and emit the event under the store lock → return
/// record.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<StudentStore>,
    event_bus: EventBus,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`.
    #[must_use]
    pub fn new(store: Arc<StudentStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Validates and stores a new registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingField`] or
    /// [`RegistryError::InvalidField`] when validation fails, and
    /// [`RegistryError::DuplicateEmail`] when the email is taken. Nothing is
    /// stored or published on error.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Student, RegistryError> {
        let new = request.validate().inspect_err(|e| {
            tracing::debug!(error = %e, "registration rejected by validation");
        })?;

        let announce = |student: &Student| {
            let receivers = self.event_bus.student_registered(student);
            tracing::debug!(student_id = %student.id, receivers, "registration event published");
        };

        let student = match self.store.insert_with(new, announce).await {
            Ok(student) => student,
            Err(RegistryError::DuplicateEmail(email)) => {
                tracing::info!(%email, "registration rejected: email already registered");
                return Err(RegistryError::DuplicateEmail(email));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            student_id = %student.id,
            name = %student.name,
            email = %student.email,
            grade = student.grade,
            "student registered"
        );
        Ok(student)
    }

    /// Returns all registered students in insertion order.
    pub async fn list_students(&self) -> Vec<Student> {
        self.store.list().await
    }

    /// Returns the student with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] if no such student exists.
    pub async fn get_student(&self, id: StudentId) -> Result<Student, RegistryError> {
        self.store.get(id).await
    }

    /// Returns the number of registered students.
    pub async fn student_count(&self) -> usize {
        self.store.len().await
    }
}
