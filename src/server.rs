//! Router assembly and HTTP serving.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tokio::net::TcpListener;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::ws;

/// Builds the complete application: REST API, registration page, live
/// feed, optional Swagger UI, and the HTTP middleware stack.
pub fn build_app(state: AppState, config: &RegistryConfig) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .merge(ws::handler::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(api::openapi::swagger_routes());

    with_request_timeout(router, config.request_timeout)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bounds every request on `router` by `timeout`. Requests that run out of
/// time are answered with [`RegistryError::Timeout`].
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(timeout),
    )
}

async fn handle_middleware_error(err: BoxError) -> RegistryError {
    if err.is::<tower::timeout::error::Elapsed>() {
        RegistryError::Timeout
    } else {
        RegistryError::Internal(err.to_string())
    }
}

/// Serves `app` on an already bound listener until the process receives
/// Ctrl-C (or the future is dropped).
///
/// # Errors
///
/// Returns an I/O error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
