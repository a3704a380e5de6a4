//! # grader-client
//!
//! HTTP client for the AutoGrader grading backend.
//!
//! Routes consumed:
//! - `POST /upload-text` embeds rubric text under a namespace
//! - `POST /upload-rubric` embeds a rubric PDF (multipart)
//! - `POST /grade-answer` grades a student answer against the stored rubric
//! - `GET /` liveness probe
//!
//! Requests are JSON with no credentials. Only the response status decides
//! success; no request is ever retried.

pub mod latency;

mod error;
mod http;

pub use error::ClientError;
pub use latency::{LatencyCase, LatencyDataset, LatencyReport, LatencySample, LoadReport};

use grader_config::ApiConfig;
use grader_core::{GradeAnswerRequest, GradeAnswerResponse, UploadTextRequest, UploadTextResponse};

use crate::http::{check_response, decode_json};

/// HTTP client bound to one grading backend.
#[derive(Debug, Clone)]
pub struct GradingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GradingClient {
    /// Create a client for `config.base_url()`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Setup`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Setup(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    /// Create a client with default settings for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Setup`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// Normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// Embed rubric text under `request.user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body is not JSON.
    pub async fn upload_text(
        &self,
        request: &UploadTextRequest,
    ) -> Result<UploadTextResponse, ClientError> {
        let url = self.url("/upload-text");
        tracing::debug!(%url, user_id = %request.user_id, bytes = request.text.len(), "uploading rubric text");
        let resp = check_response(self.http.post(&url).json(request).send().await?).await?;
        decode_json(resp).await
    }

    /// Ask the backend to grade a student answer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body is not JSON.
    pub async fn grade_answer(
        &self,
        request: &GradeAnswerRequest,
    ) -> Result<GradeAnswerResponse, ClientError> {
        let url = self.url("/grade-answer");
        tracing::debug!(%url, user_id = %request.user_id, "grading answer");
        let resp = check_response(self.http.post(&url).json(request).send().await?).await?;
        decode_json(resp).await
    }

    /// Embed a rubric PDF under `user_id`.
    ///
    /// Sent as `multipart/form-data` with a `user_id` text part and a `file`
    /// part.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body is not JSON.
    pub async fn upload_rubric_pdf(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadTextResponse, ClientError> {
        let url = self.url("/upload-rubric");
        tracing::debug!(%url, user_id, file_name, bytes = bytes.len(), "uploading rubric pdf");

        let file = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ClientError::Setup(format!("invalid mime type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .text("user_id", user_id.to_string())
            .part("file", file);

        let resp = check_response(self.http.post(&url).multipart(form).send().await?).await?;
        decode_json(resp).await
    }

    /// Liveness probe against the backend root.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let url = self.url("/");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        decode_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = GradingClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/upload-text"), "http://localhost:8000/upload-text");
        assert_eq!(client.url("/"), "http://localhost:8000/");
    }

    #[test]
    fn from_config_applies_timeout() {
        let config = ApiConfig {
            base_url: "http://grader.local".into(),
            timeout_secs: Some(5),
            ..ApiConfig::default()
        };
        let client = GradingClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://grader.local");
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally.
        let client = GradingClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .grade_answer(&GradeAnswerRequest {
                user_id: "u".into(),
                question: "q".into(),
                student_response: "a".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
