use crate::config::ApiConfig;
use crate::model::{Incident, NewIncident, Status, StatusChange};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Any failed backend call. Callers surface one fixed message per operation and
/// only log the variant.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Backend surface consumed by the dashboard.
///
/// Futures are not `Send`: in the browser every request runs on the page's
/// single event loop.
#[async_trait(?Send)]
pub trait IncidentApi {
    async fn list_incidents(&self) -> Result<Vec<Incident>, ApiError>;

    async fn create_incident(&self, draft: &NewIncident) -> Result<Incident, ApiError>;

    async fn update_status(&self, incident_id: &str, status: Status) -> Result<Incident, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpIncidentApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpIncidentApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl IncidentApi for HttpIncidentApi {
    async fn list_incidents(&self) -> Result<Vec<Incident>, ApiError> {
        let url = self.config.incidents_url();
        let request = self.client.get(url.clone());
        let incidents: Vec<Incident> = send_json(request, &url).await?;
        tracing::debug!(count = incidents.len(), "fetched incidents");
        Ok(incidents)
    }

    async fn create_incident(&self, draft: &NewIncident) -> Result<Incident, ApiError> {
        let url = self.config.incidents_url();
        let request = self.client.post(url.clone()).json(draft);
        let created: Incident = send_json(request, &url).await?;
        tracing::info!(id = %created.id, severity = %created.severity, "created incident");
        Ok(created)
    }

    async fn update_status(&self, incident_id: &str, status: Status) -> Result<Incident, ApiError> {
        let url = self.config.status_url(incident_id);
        let request = self.client.patch(url.clone()).json(&StatusChange { status });
        let updated: Incident = send_json(request, &url).await?;
        tracing::info!(id = %updated.id, status = %updated.status, "updated incident status");
        Ok(updated)
    }
}

async fn send_json<R>(request: reqwest::RequestBuilder, url: &Url) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    let response = request.send().await.map_err(|source| ApiError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.json::<R>().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
