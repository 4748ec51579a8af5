//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{bookings, entities, relations};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Entities
        .route("/api/entities", get(entities::list_entities))
        .route("/api/entities/:id", get(entities::get_entity))
        .route("/api/entities/:id/pricefactor", get(entities::get_price_factor))
        // Relations
        .route(
            "/api/relations/:component/:area/:instanceid",
            get(relations::get_relation)
                .put(relations::put_relation)
                .delete(relations::delete_relation),
        )
        .route(
            "/api/relations/:component/:area/:instanceid/divergent",
            get(relations::get_divergent),
        )
        // Cleanup
        .route(
            "/api/bookings/:bookingid/relations",
            delete(bookings::delete_booking_relations),
        )
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
