use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use std::time::Duration;

use super::{ApartmentApi, ApiError};
use crate::models::{ApartmentFields, ApartmentId, ApartmentRecord};

const COLLECTION_PATH: [&str; 2] = ["api", "apartments"];
const TOGGLE_SEGMENT: &str = "toggle-status";

/// `ApartmentApi` over HTTP. The base address is resolved once at startup and
/// handed in; nothing here looks at the environment.
#[derive(Debug, Clone)]
pub struct HttpApartmentApi {
    client: Client,
    base_url: Url,
}

impl HttpApartmentApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<HttpApartmentApi> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid backend address {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("backend address {base_url} cannot hold a path"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpApartmentApi { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(COLLECTION_PATH).extend(segments);
        }
        url
    }

    async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            detail: e.to_string(),
        })?;

        let status = response.status();
        debug!("{url} responded with {status}");

        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            detail: format!("failed to read response body: {e}"),
        })?;

        if status.is_success() {
            return Ok(body);
        }

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound {
                url: url.to_string(),
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Rejected {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            },
            _ => ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            },
        })
    }
}

// Create and update may answer with the stored record, an empty body or some
// acknowledgement object. Only the first is worth keeping.
fn echoed_record(url: &Url, body: &str) -> Option<ApartmentRecord> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("{url} did not echo an apartment: {e}");
            None
        }
    }
}

#[async_trait]
impl ApartmentApi for HttpApartmentApi {
    async fn list(&self) -> Result<Vec<ApartmentRecord>, ApiError> {
        let url = self.url(&[]);
        let body = self.execute(self.client.get(url.clone()), &url).await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }

    async fn create(&self, fields: &ApartmentFields) -> Result<Option<ApartmentRecord>, ApiError> {
        let url = self.url(&[]);
        let body = self
            .execute(self.client.post(url.clone()).json(fields), &url)
            .await?;
        Ok(echoed_record(&url, &body))
    }

    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<Option<ApartmentRecord>, ApiError> {
        let url = self.url(&[id.as_str()]);
        let body = self
            .execute(self.client.put(url.clone()).json(fields), &url)
            .await?;
        Ok(echoed_record(&url, &body))
    }

    async fn delete(&self, id: &ApartmentId) -> Result<(), ApiError> {
        let url = self.url(&[id.as_str()]);
        self.execute(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }

    async fn toggle_status(&self, id: &ApartmentId) -> Result<(), ApiError> {
        let url = self.url(&[id.as_str(), TOGGLE_SEGMENT]);
        self.execute(self.client.patch(url.clone()), &url).await?;
        Ok(())
    }
}
