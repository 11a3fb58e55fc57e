//! Contact route handlers for the HTTP API

use super::extract::ContactPayload;
use super::server::{ApiError, AppState, api_error};
use crate::http::{ErrorResponse, contact_location};
use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::Json,
};
use contacts::{Contact, ContactStore};
use log::{error, trace};

/// Run a mutation (and its file write) on the blocking pool under the store's
/// write guard.
async fn mutate_store<T, F>(app_state: &AppState, mutation: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut ContactStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = app_state.store.clone();
    tokio::task::spawn_blocking(move || {
        let mut guard = store.write();
        mutation(&mut *guard)
    })
    .await
    .map_err(|e| {
        error!("Store task failed: {e}");
        api_error(ErrorResponse::internal_error("Store task failed"))
    })
}

pub async fn list_contacts(State(app_state): State<AppState>) -> Json<Vec<Contact>> {
    let contacts = app_state.store.read().list().to_vec();
    trace!("GET /contacts - {} contacts", contacts.len());
    Json(contacts)
}

#[tracing::instrument(level = "debug", skip(app_state, payload))]
pub async fn create_contact(
    State(app_state): State<AppState>,
    ContactPayload(payload): ContactPayload,
) -> Result<(StatusCode, [(axum::http::HeaderName, String); 1], Json<String>), ApiError> {
    let result = mutate_store(&app_state, move |store| {
        store.add(&payload.first_name, &payload.last_name)
    })
    .await?;
    match result {
        Ok(contact) => {
            let location = contact_location(&contact.id);
            trace!("POST /contacts - created {}", contact.id);
            Ok((
                StatusCode::CREATED,
                [(LOCATION, location.clone())],
                Json(location),
            ))
        }
        Err(error) => {
            error!("POST /contacts failed: {error}");
            Err(api_error(ErrorResponse::from(error)))
        }
    }
}

#[tracing::instrument(level = "debug", skip(app_state))]
pub async fn get_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    match app_state.store.read().get(&id) {
        Some(contact) => {
            trace!("GET /contacts/{id} - found");
            Ok(Json(contact.clone()))
        }
        None => {
            trace!("GET /contacts/{id} - not found");
            Err(api_error(ErrorResponse::contact_not_found(&id)))
        }
    }
}

#[tracing::instrument(level = "debug", skip(app_state, payload))]
pub async fn update_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    ContactPayload(payload): ContactPayload,
) -> Result<Json<Contact>, ApiError> {
    let contact_id = id.clone();
    let result = mutate_store(&app_state, move |store| {
        store.update(&contact_id, &payload.first_name, &payload.last_name)
    })
    .await?;
    match result {
        Ok(Some(contact)) => {
            trace!("PUT /contacts/{id} - updated");
            Ok(Json(contact))
        }
        Ok(None) => Err(api_error(ErrorResponse::contact_not_found(&id))),
        Err(error) => {
            error!("PUT /contacts/{id} failed: {error}");
            Err(api_error(ErrorResponse::from(error)))
        }
    }
}

#[tracing::instrument(level = "debug", skip(app_state))]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let contact_id = id.clone();
    let result = mutate_store(&app_state, move |store| store.remove(&contact_id)).await?;
    match result {
        Ok(Some(_)) => {
            trace!("DELETE /contacts/{id} - removed");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(api_error(ErrorResponse::contact_not_found(&id))),
        Err(error) => {
            error!("DELETE /contacts/{id} failed: {error}");
            Err(api_error(ErrorResponse::from(error)))
        }
    }
}
