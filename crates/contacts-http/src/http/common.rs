//! HTTP API request and response types

use contacts::{Contact, ContactsError};
use serde::{Deserialize, Serialize};

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

pub fn contact_location(id: &str) -> String {
    format!("/contacts/{id}")
}

pub fn write_contacts<W: std::io::Write>(out: &mut W, contacts: &[Contact]) -> std::io::Result<()> {
    for contact in contacts {
        writeln!(out, "{}", contact.display_name())?;
    }
    Ok(())
}

// =============================================================================
// CONTACT API TYPES
// =============================================================================

/// Body of `POST /contacts` and `PUT /contacts/{id}`, as JSON or form fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
}

impl ContactRequest {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

pub fn validate_contact_request(request: &ContactRequest) -> Result<(), ErrorResponse> {
    contacts::validate_names(&request.first_name, &request.last_name)
        .map_err(ErrorResponse::from)
}

// =============================================================================
// ERROR ENVELOPE
// =============================================================================

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
        }
    }
    pub fn with_details(error: &str, message: &str, details: serde_json::Value) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: Some(details),
        }
    }
    pub fn invalid_body(message: &str) -> Self {
        Self::new("invalid_body", message)
    }
    pub fn contact_not_found(id: &str) -> Self {
        Self::with_details(
            "contact_not_found",
            &format!("Contact '{id}' not found"),
            serde_json::json!({ "id": id }),
        )
    }
    pub fn internal_error(message: &str) -> Self {
        Self::new("internal_error", message)
    }
}

impl From<ContactsError> for ErrorResponse {
    fn from(err: ContactsError) -> Self {
        match err {
            ContactsError::InvalidName { field, reason } => Self::with_details(
                "validation_error",
                &format!("Invalid {field}: {reason}"),
                serde_json::json!({ "field": field }),
            ),
            ContactsError::Storage(storage_err) => {
                Self::internal_error(&format!("Storage error: {storage_err}"))
            }
        }
    }
}
