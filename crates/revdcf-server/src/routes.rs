//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the application router.
///
/// # Arguments
/// * `state` - Solver, templates and share-link base shared by all handlers
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Calculator page
        .route("/", get(handlers::index_page).post(handlers::index_submit))
        // JSON API
        .route(
            "/api/v1/implied-growth",
            get(handlers::implied_growth_query).post(handlers::implied_growth_json),
        )
        .with_state(state)
}
