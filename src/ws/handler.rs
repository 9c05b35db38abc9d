//! Axum WebSocket upgrade handler.

use axum::Router;
use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;
use axum::routing::get;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to the live registration feed.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    let service = std::sync::Arc::clone(&state.registration_service);

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, service))
}

/// Live-feed route mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}
