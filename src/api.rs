use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::config::Backend;
use crate::models::{BookingReceipt, BookingRequest, Event, EventsEnvelope};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("event-booker/0.1")
        .build()
        .expect("failed to build http client")
});

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum BookingError {
    // carries the server's error text when it sent one
    #[error("booking rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}

pub struct ApiClient {
    backend: Backend,
}

impl ApiClient {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    // GET {base}/api/events, expecting { "data": [...] }
    pub async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        let url = self.backend.url("api/events");
        let response = CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Http(err.to_string()))?;
        let envelope: EventsEnvelope =
            serde_json::from_str(&body).map_err(|err| ApiError::Parse(err.to_string()))?;

        debug!(count = envelope.data.len(), "fetched events");
        Ok(envelope.data)
    }

    // POST {base}/api/bookings. Accepted only when the HTTP status is
    // successful and the body says success: true.
    pub async fn submit_booking(&self, request: &BookingRequest) -> Result<(), BookingError> {
        let url = self.backend.url("api/bookings");
        let response = CLIENT
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| BookingError::Transport(err.to_string()))?;

        let status = response.status();
        let receipt: BookingReceipt = response
            .json()
            .await
            .map_err(|err| BookingError::Transport(err.to_string()))?;

        if status.is_success() && receipt.success {
            return Ok(());
        }
        Err(BookingError::Rejected(
            receipt
                .error
                .unwrap_or_else(|| "Please try again.".to_string()),
        ))
    }
}
