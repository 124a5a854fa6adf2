// API client module: a small blocking HTTP client that uploads one
// document to the ingestion service. Synchronous on purpose: the whole
// program is a single request.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::config::Config;
use crate::error::IngestError;
use crate::payload::IngestPayload;

/// Status line and raw body of whatever the service answered. The body is
/// not parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestResponse {
    pub status: u16,
    pub body: String,
}

impl IngestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can deliver an ingest payload. `ApiClient` is the real
/// one; tests substitute a recorder.
pub trait Ingest {
    fn ingest(&self, payload: &IngestPayload) -> Result<IngestResponse, IngestError>;
}

/// Blocking client bound to one ingestion endpoint and bearer token.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    ingest_url: String,
}

impl ApiClient {
    /// Build a client from the startup configuration. The bearer token is
    /// installed as a default header. reqwest's blocking client times out
    /// after 30s by default, so the timeout is always set explicitly from
    /// the config (usually `None`).
    pub fn new(config: &Config) -> Result<Self, IngestError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, config.bearer_header()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(ApiClient {
            client,
            ingest_url: config.ingest_url(),
        })
    }

    pub fn ingest_url(&self) -> &str {
        &self.ingest_url
    }
}

impl Ingest for ApiClient {
    /// POST the payload as JSON. Any HTTP status counts as a response;
    /// only transport failures are errors.
    fn ingest(&self, payload: &IngestPayload) -> Result<IngestResponse, IngestError> {
        let body = payload.to_json()?;
        debug!(url = %self.ingest_url, bytes = body.len(), "posting ingest payload");

        let res = self
            .client
            .post(&self.ingest_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(IngestResponse { status, body })
    }
}
