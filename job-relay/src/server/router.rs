use axum::routing::any;
use axum::Router;

use super::handlers::{webhook_handler, worker_handler};
use super::state::AppState;

/// Both routes accept any method; the handlers decide what each method means.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", any(webhook_handler))
        .route("/worker", any(worker_handler))
        .with_state(state)
}
