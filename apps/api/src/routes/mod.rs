pub mod health;
pub mod matches;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Engine primitives
        .route("/api/v1/skills/extract", post(matches::handle_extract))
        .route(
            "/api/v1/jobs/requirements",
            post(matches::handle_requirements),
        )
        // Scoring
        .route("/api/v1/matches", post(matches::handle_match))
        .route("/api/v1/matches/batch", post(matches::handle_batch_match))
        // Analytics over caller-held history
        .route(
            "/api/v1/reports/profile",
            post(matches::handle_profile_report),
        )
        .fallback(not_found)
        .with_state(state)
}
