pub mod apartment_client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ApartmentFields, ApartmentId, ApartmentRecord};

pub use apartment_client::HttpApartmentApi;

/// Failure of a single round trip to the apartments backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },

    #[error("apartment not found at {url}")]
    NotFound { url: String },

    #[error("backend rejected request to {url} ({status}): {body}")]
    Rejected { url: String, status: u16, body: String },

    #[error("backend responded with error {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("malformed response from {url}: {detail}")]
    Decode { url: String, detail: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

/// The remote apartments collection. Every call is one request/response round trip.
#[async_trait]
pub trait ApartmentApi: Send + Sync {
    async fn list(&self) -> Result<Vec<ApartmentRecord>, ApiError>;

    /// Returns the created record when the backend echoes it back.
    async fn create(&self, fields: &ApartmentFields) -> Result<Option<ApartmentRecord>, ApiError>;

    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<Option<ApartmentRecord>, ApiError>;

    async fn delete(&self, id: &ApartmentId) -> Result<(), ApiError>;

    /// The backend decides the new status, nothing is sent.
    async fn toggle_status(&self, id: &ApartmentId) -> Result<(), ApiError>;
}
