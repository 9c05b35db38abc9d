//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Student endpoints are mounted under `/api`; the registration page and
//! health check live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .merge(handlers::page::routes())
}
