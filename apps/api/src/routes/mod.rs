pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/taxonomy", get(handlers::handle_get_taxonomy))
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route("/api/v1/match/preview", post(handlers::handle_match_preview))
        .route(
            "/api/v1/resumes/:id/match",
            post(handlers::handle_match_resume),
        )
        .with_state(state)
}
