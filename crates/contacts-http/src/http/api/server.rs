//! HTTP server implementation for the contacts API

use axum::{Json, http::StatusCode};
use contacts::ContactStore;
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::routes::create_router;
use crate::http::ErrorResponse;

/// Store shared between the CLI dispatcher and request handlers.
///
/// A mutation and its file write happen under one write guard, so concurrent
/// requests never interleave their snapshots.
pub type SharedStore = Arc<RwLock<ContactStore>>;

pub type AppState = Arc<AppStateInner>;

#[derive(Clone)]
pub struct AppStateInner {
    pub store: SharedStore,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_to_status_code(error_code: &str) -> StatusCode {
    match error_code {
        "validation_error" => StatusCode::BAD_REQUEST,
        "contact_not_found" => StatusCode::NOT_FOUND,
        "internal_error" => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn api_error(error_response: ErrorResponse) -> ApiError {
    (
        error_to_status_code(&error_response.error),
        Json(error_response),
    )
}

pub fn create_app_state(store: SharedStore) -> AppState {
    Arc::new(AppStateInner { store })
}

pub async fn start_server(
    port: u16,
    store: SharedStore,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let bind_address = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("Failed to bind to address {bind_address}: {e}"))?;
    serve_listener(listener, store).await
}

/// Serve on an already bound listener (tests bind to port 0).
pub async fn serve_listener(
    listener: TcpListener,
    store: SharedStore,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(create_app_state(store));
    let local_addr = listener.local_addr()?;
    info!("Contacts API listening on http://{local_addr}");
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server failed: {e}"))?;
    Ok(())
}
