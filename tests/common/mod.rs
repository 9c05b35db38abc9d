//! Shared helpers for integration tests.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;

use student_registry::app_state::AppState;
use student_registry::config::RegistryConfig;
use student_registry::server;

/// Starts a fresh server with an empty store on an ephemeral port and
/// returns its address.
pub async fn spawn_server() -> SocketAddr {
    let config = RegistryConfig::default();
    let app = server::build_app(AppState::new(config.event_bus_capacity), &config);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local address");
    };
    tokio::spawn(server::serve(listener, app));
    addr
}

/// Returns `http://{addr}{path}`.
pub fn http_url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
