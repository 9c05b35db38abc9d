//! Registration page served at `/`.

use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// `GET /` — HTML form that registers students and lists them live.
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Page routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}
