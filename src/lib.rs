//! # student-registry
//!
//! REST API and live feed for an in-memory student registration store.
//!
//! Students register with a name, an email and a grade. The store assigns
//! sequential ids starting at 1, rejects emails that are already taken, and
//! answers lookups by id. Everything lives in process memory and is reset
//! on restart.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Live feed (ws/)
//!     │
//!     ├── RegistrationService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── StudentStore (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
