//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` streams `student_registered` events to connected
//! clients and answers a small set of commands.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
