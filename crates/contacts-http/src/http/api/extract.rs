//! Body extractor accepting JSON or URL-encoded contact payloads

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{HeaderValue, header::CONTENT_TYPE},
};
use log::error;

use super::server::{ApiError, api_error};
use crate::http::{ContactRequest, ErrorResponse, validate_contact_request};

/// A validated `ContactRequest`.
///
/// `application/x-www-form-urlencoded` bodies (matched case-insensitively) are
/// read as form fields; any other content type goes through the JSON
/// extractor, which answers 415 when the header is missing.
pub struct ContactPayload(pub ContactRequest);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form_request(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request = if is_form_request(&req) {
            // `Form` only recognises the lowercase spelling
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            match Form::<ContactRequest>::from_request(req, state).await {
                Ok(Form(request)) => request,
                Err(rejection) => {
                    error!("Rejected form body: {}", rejection.body_text());
                    return Err((
                        rejection.status(),
                        Json(ErrorResponse::invalid_body(&rejection.body_text())),
                    ));
                }
            }
        } else {
            match Json::<ContactRequest>::from_request(req, state).await {
                Ok(Json(request)) => request,
                Err(rejection) => {
                    error!("Rejected JSON body: {}", rejection.body_text());
                    return Err((
                        rejection.status(),
                        Json(ErrorResponse::invalid_body(&rejection.body_text())),
                    ));
                }
            }
        };

        if let Err(error_response) = validate_contact_request(&request) {
            error!("Contact validation failed: {}", error_response.message);
            return Err(api_error(error_response));
        }
        Ok(ContactPayload(request))
    }
}
