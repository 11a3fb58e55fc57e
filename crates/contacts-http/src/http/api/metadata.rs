//! Metadata route handlers

use axum::http::StatusCode;
use log::trace;

pub async fn health_check() -> StatusCode {
    trace!("GET /health");
    StatusCode::OK
}
