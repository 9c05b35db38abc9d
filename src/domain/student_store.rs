//! In-memory registration store.
//!
//! [`StudentStore`] keeps every registered [`Student`] in insertion order
//! behind a single [`tokio::sync::RwLock`]. Lookups are linear scans; the
//! store lives for the process lifetime and is empty after a restart.

use tokio::sync::RwLock;

use super::{NewStudent, Student, StudentId};
use crate::error::RegistryError;

/// Ordered, append-only collection of student records.
///
/// # Concurrency
///
/// - Reads (`list`, `get`, `len`) share the lock.
/// - `insert` holds the write lock across the duplicate-email scan, id
///   assignment and append, so ids are always `1..=n` without gaps and an
///   email is never stored twice.
#[derive(Debug, Default)]
pub struct StudentStore {
    students: RwLock<Vec<Student>>,
}

impl StudentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            students: RwLock::new(Vec::new()),
        }
    }

    /// Appends a new student and returns the stored record.
    ///
    /// The new id is `len + 1` at insertion time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEmail`] if a record with exactly the
    /// same email (case-sensitive) already exists. The store is unchanged in
    /// that case.
    pub async fn insert(&self, new: NewStudent) -> Result<Student, RegistryError> {
        self.insert_with(new, |_| {}).await
    }

    /// Like [`StudentStore::insert`], but runs `on_insert` on the stored
    /// record before the write lock is released.
    ///
    /// Successive `on_insert` calls therefore observe records in id order,
    /// even under concurrent registrations. `on_insert` must not touch the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEmail`] as [`StudentStore::insert`]
    /// does; `on_insert` is not called in that case.
    pub async fn insert_with<F>(
        &self,
        new: NewStudent,
        on_insert: F,
    ) -> Result<Student, RegistryError>
    where
        F: FnOnce(&Student),
    {
        let mut students = self.students.write().await;

        if students.iter().any(|s| s.email == new.email) {
            return Err(RegistryError::DuplicateEmail(new.email));
        }

        let next = u64::try_from(students.len())
            .map_err(|_| RegistryError::Internal("student count overflow".to_string()))?
            .saturating_add(1);
        let student = new.into_student(StudentId::new(next));
        students.push(student.clone());
        on_insert(&student);
        Ok(student)
    }

    /// Returns all students in insertion order.
    pub async fn list(&self) -> Vec<Student> {
        self.students.read().await.clone()
    }

    /// Returns the student with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] if no record has that id.
    pub async fn get(&self, id: StudentId) -> Result<Student, RegistryError> {
        let students = self.students.read().await;
        students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(RegistryError::StudentNotFound(id))
    }

    /// Returns the number of registered students.
    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    /// Returns `true` if no student has registered yet.
    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }
}
