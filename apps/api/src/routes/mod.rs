pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compare;
use crate::jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Listing discovery
        .route("/api/v1/jobs", get(jobs::handlers::handle_browse))
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_job_detail))
        // CV comparison
        .route(
            "/api/v1/jobs/:id/compare",
            post(compare::handlers::handle_compare),
        )
        .with_state(state)
}
