//! HTTP client for communicating with srtriaged.

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use srtriage_common::api::{ClassifyResponse, CorrectionRequest, ErrorBody, HealthResponse};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(
        "Cannot reach srtriaged at {url}: {source}\n\n\
         Is the daemon running? Start it with `srtriaged` or pass --server."
    )]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("srtriaged returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from srtriaged: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Cannot build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// One attachment for a submission
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Form fields of a submission, as the portal sends them
#[derive(Debug, Clone, Default)]
pub struct SubmitForm {
    pub name: String,
    pub employee_id: String,
    pub query: String,
    pub attachments: Vec<Attachment>,
}

impl SubmitForm {
    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("name", self.name)
            .text("employeeId", self.employee_id)
            .text("query", self.query);
        for attachment in self.attachments {
            form = form.part(
                "files",
                Part::bytes(attachment.bytes).file_name(attachment.file_name),
            );
        }
        form
    }
}

/// Client for the srtriaged HTTP API
pub struct TriageClient {
    base_url: String,
    http: reqwest::Client,
}

impl TriageClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit a request for triage (POST /classify)
    pub async fn classify(&self, form: SubmitForm) -> Result<ClassifyResponse, ClientError> {
        let url = self.url("/classify");
        let response = self
            .http
            .post(&url)
            .multipart(form.into_multipart())
            .send()
            .await
            .map_err(|source| ClientError::Unreachable { url, source })?;
        decode(response).await
    }

    /// Record a human correction (POST /correction)
    pub async fn correct(&self, correction: &CorrectionRequest) -> Result<(), ClientError> {
        let url = self.url("/correction");
        let response = self
            .http
            .post(&url)
            .json(correction)
            .send()
            .await
            .map_err(|source| ClientError::Unreachable { url, source })?;
        decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Daemon health and loaded label sets (GET /health)
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.url("/health");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Unreachable { url, source })?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status != StatusCode::OK {
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = if body.error.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.error
        };
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    response.json().await.map_err(ClientError::InvalidResponse)
}
