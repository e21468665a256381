use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::dto::candidate_dto::DeleteCandidateResponse;
use crate::models::candidate::{Candidate, CandidateStatus};

pub const FETCH_FAILED: &str = "Failed to fetch candidates";
pub const CREATE_FAILED: &str = "Failed to create candidate";
pub const UPDATE_STATUS_FAILED: &str = "Failed to update status";
pub const DELETE_FAILED: &str = "Failed to delete candidate";

/// Error payload as the API sends it, or a generic stand-in when none could be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            fields: BTreeMap::new(),
        }
    }
}

/// Everything the referral form submits on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub resume: Option<ResumeFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The four candidate endpoints as seen by the frontend. Each call is fire-once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateApi: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, ApiError>;

    async fn create_candidate(&self, submission: CandidateSubmission) -> Result<Candidate, ApiError>;

    async fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Candidate, ApiError>;

    async fn delete_candidate(&self, id: Uuid) -> Result<DeleteCandidateResponse, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpCandidateApi {
    http: Client,
    base_url: String,
}

impl HttpCandidateApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute link for a stored `resumeUrl`.
    pub fn resume_link(&self, resume_url: &str) -> Option<String> {
        resume_link(&self.base_url, resume_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn resume_link(base_url: &str, resume_url: &str) -> Option<String> {
    if resume_url.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        resume_url.trim_start_matches('/')
    ))
}

#[async_trait]
impl CandidateApi for HttpCandidateApi {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        let resp = self.http.get(self.url("/candidates")).send().await;
        read_json(resp, FETCH_FAILED).await
    }

    async fn create_candidate(&self, submission: CandidateSubmission) -> Result<Candidate, ApiError> {
        let mut form = multipart::Form::new()
            .text("name", submission.name)
            .text("email", submission.email)
            .text("phone", submission.phone)
            .text("jobTitle", submission.job_title);

        if let Some(resume) = submission.resume {
            let part = multipart::Part::bytes(resume.bytes)
                .file_name(resume.file_name)
                .mime_str("application/pdf")
                .map_err(|_| ApiError::new(CREATE_FAILED))?;
            form = form.part("resume", part);
        }

        let resp = self
            .http
            .post(self.url("/candidates"))
            .multipart(form)
            .send()
            .await;
        read_json(resp, CREATE_FAILED).await
    }

    async fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Candidate, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/candidates/{}/status", id)))
            .json(&json!({ "status": status }))
            .send()
            .await;
        read_json(resp, UPDATE_STATUS_FAILED).await
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<DeleteCandidateResponse, ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/candidates/{}", id)))
            .send()
            .await;
        read_json(resp, DELETE_FAILED).await
    }
}

/// Decodes a success body, or turns any failure into an [`ApiError`].
async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Result<Response>,
    fallback: &str,
) -> Result<T, ApiError> {
    let resp = resp.map_err(|e| {
        tracing::warn!("Request failed: {}", e);
        ApiError::new(fallback)
    })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let error = resp
            .json::<ApiError>()
            .await
            .unwrap_or_else(|_| ApiError::new(fallback));
        tracing::debug!(%status, error = %error.error, "API returned an error");
        return Err(error);
    }

    resp.json::<T>().await.map_err(|e| {
        tracing::warn!("Unreadable response body: {}", e);
        ApiError::new(fallback)
    })
}
