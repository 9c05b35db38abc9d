//! Live registration feed.
//!
//! [`EventBus`] fans every stored registration out to the WebSocket
//! connections currently open on `/ws`. It is fed from inside the store's
//! write lock, so subscribers see registrations in id order.

use chrono::Utc;
use tokio::sync::broadcast;

use super::{RegistryEvent, Student};

/// Broadcast bus for [`RegistryEvent`]s.
///
/// Backed by a `tokio::broadcast` ring buffer. Receivers that fall more
/// than `capacity` events behind lose the oldest ones and get
/// [`broadcast::error::RecvError::Lagged`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per receiver
    /// (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Announces a freshly stored student to every live subscriber.
    ///
    /// Returns how many subscribers were reached; with nobody listening the
    /// event is dropped and `0` is returned.
    pub fn student_registered(&self, student: &Student) -> usize {
        let event = RegistryEvent::StudentRegistered {
            student: student.clone(),
            timestamp: Utc::now(),
        };
        self.sender.send(event).unwrap_or(0)
    }

    /// Opens a receiver for every registration announced from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    /// Number of open subscriptions, i.e. live-feed connections.
    #[must_use]
    pub fn live_subscribers(&self) -> usize {
        self.sender.receiver_count()
    }
}
