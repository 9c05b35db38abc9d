//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] validates registrations, delegates storage to
//! the [`super::domain::StudentStore`], and emits events through the
//! [`super::domain::EventBus`].

pub mod registration_service;

pub use registration_service::RegistrationService;
