//! Error types for outbound calls and CLI commands

use super::common::ErrorResponse;
use contacts::ContactsError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    Transport(String),
    UnexpectedStatus { status: u16, message: String },
    Decode(String),
}

#[derive(Debug)]
pub enum CliError {
    Contacts(ContactsError),
    Client(ClientError),
    Output(std::io::Error),
    Server(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Failed to reach remote instance: {msg}"),
            ClientError::UnexpectedStatus { status, message } => {
                write!(f, "Remote instance answered {status}: {message}")
            }
            ClientError::Decode(msg) => write!(f, "Failed to parse remote response: {msg}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Contacts(err) => write!(f, "{err}"),
            CliError::Client(err) => write!(f, "{err}"),
            CliError::Output(err) => write!(f, "Failed to write output: {err}"),
            CliError::Server(msg) => write!(f, "Server error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
impl std::error::Error for CliError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<ContactsError> for CliError {
    fn from(err: ContactsError) -> Self {
        CliError::Contacts(err)
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        CliError::Client(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err)
    }
}

/// Turn a non-success response into a `ClientError`, preferring the server's
/// error envelope message over the raw body.
pub async fn unexpected_status(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error_response) => error_response.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string(),
            Err(_) => body.trim().to_string(),
        },
        Err(body_error) => format!("failed to read response body: {body_error}"),
    };
    ClientError::UnexpectedStatus {
        status: status.as_u16(),
        message,
    }
}
