//! HTTP client for talking to a running car registry server.

use crate::api::Acknowledgement;
use crate::metrics::MetricsSnapshot;
use crate::registry::Record;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned while calling the registry over HTTP.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a usable response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server rejected the request as malformed or missing filters.
    #[error("Request rejected by registry: {0}")]
    InvalidRequest(String),
    /// The server responded with a status the registry contract does not define.
    #[error("Unexpected registry response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from the server.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The car was stored; the server echoed the stored record.
    Created(Record),
    /// The car was stored; the server answered with its fixed acknowledgement.
    Acknowledged,
    /// A car with the same make and model already exists.
    Conflict,
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A matching car.
    Found(Record),
    /// The query was valid but nothing matched.
    NoContent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedBody {
    Ack(Acknowledgement),
    Record(Record),
}

/// Lightweight HTTP client for the registry endpoints.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    /// Build a client targeting `base_url` (for example `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().user_agent("car-registry/0.1").build()?;
        let base_url = normalize_base_url(base_url).map_err(ClientError::InvalidUrl)?;
        tracing::debug!(url = %base_url, "Initialized registry HTTP client");
        Ok(Self { client, base_url })
    }

    /// Register a car.
    pub async fn register(&self, record: &Record) -> Result<RegisterOutcome, ClientError> {
        let response = self.request(Method::PUT, "car").json(record).send().await?;
        match response.status() {
            StatusCode::CREATED => Ok(match response.json::<CreatedBody>().await? {
                CreatedBody::Ack(_) => RegisterOutcome::Acknowledged,
                CreatedBody::Record(stored) => RegisterOutcome::Created(stored),
            }),
            StatusCode::CONFLICT => Ok(RegisterOutcome::Conflict),
            StatusCode::BAD_REQUEST => Err(ClientError::InvalidRequest(response.text().await?)),
            status => Err(unexpected(status, response).await),
        }
    }

    /// Look up a car by make and/or model. Terms are sent as-is; the server trims them.
    pub async fn lookup(
        &self,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Result<LookupOutcome, ClientError> {
        let mut params = Vec::new();
        if let Some(make) = make {
            params.push(("make", make));
        }
        if let Some(model) = model {
            params.push(("model", model));
        }

        let response = self.request(Method::GET, "car").query(&params).send().await?;
        match response.status() {
            StatusCode::OK => Ok(LookupOutcome::Found(response.json().await?)),
            StatusCode::NO_CONTENT => Ok(LookupOutcome::NoContent),
            StatusCode::BAD_REQUEST => Err(ClientError::InvalidRequest(response.text().await?)),
            status => Err(unexpected(status, response).await),
        }
    }

    /// Fetch the server's counters.
    pub async fn metrics(&self) -> Result<MetricsSnapshot, ClientError> {
        let response = self.request(Method::GET, "metrics").send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(unexpected(status, response).await),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.base_url))
    }
}

async fn unexpected(status: StatusCode, response: reqwest::Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    ClientError::UnexpectedStatus { status, body }
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("URL is empty".to_string());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("URL must start with http:// or https://: {trimmed}"));
    }
    Ok(trimmed.to_string())
}
