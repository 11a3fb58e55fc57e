//! Route configuration for the contacts HTTP API

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{contacts, metadata, server::AppState};

/// Creates the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(metadata::health_check))
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        // Older clients post to the collection with a trailing slash
        .route("/contacts/", post(contacts::create_contact))
        .route(
            "/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
