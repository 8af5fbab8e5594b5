use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::StringService;

use super::handlers::*;

/// Application state shared across all handlers
pub struct AppState {
    pub service: Arc<StringService>,
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // String operations
        .route("/strings", post(create_string).get(list_strings))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route("/strings/:value", get(get_string).delete(delete_string))
        // Health and metrics
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
