pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/extract", post(handlers::handle_extract))
        .route("/api/v1/skills/match", post(handlers::handle_match))
        .with_state(state)
}
