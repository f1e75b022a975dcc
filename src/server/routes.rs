//! Route definitions for the dashboard API server

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Creates the main application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // Allow all origins so a browser dashboard can talk to the API directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Static view catalog
        .route("/views", get(handlers::list_views))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", get(handlers::get_session))
        .route("/sessions/:session_id", put(handlers::replace_session_data))
        .route("/sessions/:session_id", delete(handlers::delete_session))
        // Summary views
        .route("/sessions/:session_id/views", get(handlers::get_all_views))
        .route(
            "/sessions/:session_id/views/:view",
            get(handlers::get_view),
        )
        .route(
            "/sessions/:session_id/views/:view/insight",
            get(handlers::get_view_insight),
        )
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
