//! Domain layer: core types, registration store, and event system.
//!
//! This module contains the server-side domain model: student identity and
//! records, the in-memory store that assigns ids and enforces email
//! uniqueness, and the event bus that broadcasts registrations.

pub mod event_bus;
pub mod registry_event;
pub mod student;
pub mod student_id;
pub mod student_store;

pub use event_bus::EventBus;
pub use registry_event::RegistryEvent;
pub use student::{NewStudent, Student};
pub use student_id::StudentId;
pub use student_store::StudentStore;
