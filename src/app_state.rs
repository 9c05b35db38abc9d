//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::RegistrationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration service for all business logic.
    pub registration_service: Arc<RegistrationService>,
    /// Event bus for live-feed subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires an empty store, the event bus and the service together.
    #[must_use]
    pub fn new(event_bus_capacity: usize) -> Self {
        let store = Arc::new(crate::domain::StudentStore::new());
        let event_bus = EventBus::new(event_bus_capacity);
        let registration_service = Arc::new(RegistrationService::new(store, event_bus.clone()));
        Self {
            registration_service,
            event_bus,
        }
    }
}
