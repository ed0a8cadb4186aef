use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::AppState;

pub mod reports;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
}

/// Full application router with state attached.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes())
        .merge(reports::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
