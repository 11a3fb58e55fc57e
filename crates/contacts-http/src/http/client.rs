//! HTTP client for forwarding contact mutations to a running instance

use super::common::ContactRequest;
use super::error::{ClientError, unexpected_status};
use contacts::Contact;
use log::debug;
use reqwest::StatusCode;

#[derive(Clone)]
pub struct ContactsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContactsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for an instance serving on the local loopback interface.
    pub fn for_port(port: u16) -> Self {
        Self::new(format!("http://127.0.0.1:{port}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contact_url(&self, id: &str) -> String {
        format!("{}/contacts/{}", self.base_url, urlencoding::encode(id))
    }

    pub async fn health(&self) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self
            .client
            .get(format!("{}/contacts", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        Ok(response.json::<Vec<Contact>>().await?)
    }

    pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>, ClientError> {
        let response = self.client.get(self.contact_url(id)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<Contact>().await?)),
            _ => Err(unexpected_status(response).await),
        }
    }

    /// Returns the location of the created contact, e.g. `/contacts/abc123`.
    pub async fn create_contact(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, ClientError> {
        let request = ContactRequest::new(first_name, last_name);
        let response = self
            .client
            .post(format!("{}/contacts", self.base_url))
            .json(&request)
            .send()
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(unexpected_status(response).await);
        }
        let location = response.json::<String>().await?;
        debug!("Remote created contact at {location}");
        Ok(location)
    }

    pub async fn update_contact(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Contact>, ClientError> {
        let request = ContactRequest::new(first_name, last_name);
        let response = self
            .client
            .put(self.contact_url(id))
            .json(&request)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<Contact>().await?)),
            _ => Err(unexpected_status(response).await),
        }
    }

    /// Returns `false` when the remote instance had no such contact.
    pub async fn delete_contact(&self, id: &str) -> Result<bool, ClientError> {
        let response = self.client.delete(self.contact_url(id)).send().await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(unexpected_status(response).await),
        }
    }
}
