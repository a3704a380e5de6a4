//! Shared HTTP response helpers.
//!
//! Status is the only success signal: any 2xx passes, everything else becomes
//! [`ClientError::Api`]. Bodies of successful responses are decoded leniently by
//! the caller's response type.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Check an HTTP response status.
///
/// Returns the response unchanged on 2xx. Any other status maps to
/// [`ClientError::Api`] carrying the status code and the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the full body and decode it as JSON.
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("{e}: {}", preview(&body))))
}

/// First 120 characters of a body, for error messages.
fn preview(body: &str) -> String {
    const LIMIT: usize = 120;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grader_core::{GradeAnswerResponse, UploadTextResponse};

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());

        let resp = mock_response(201, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_server_error_keeps_body() {
        let resp = mock_response(500, "Internal Server Error");
        let err = check_response(resp).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_client_errors_are_api_errors() {
        for status in [400, 401, 404, 422, 429] {
            let err = check_response(mock_response(status, "")).await.unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
    }

    #[tokio::test]
    async fn decode_json_reads_optional_fields() {
        let body: UploadTextResponse = decode_json(mock_response(200, r#"{"message":"ok"}"#))
            .await
            .unwrap();
        assert_eq!(body.message_text().as_deref(), Some("ok"));

        let body: GradeAnswerResponse = decode_json(mock_response(200, "{}")).await.unwrap();
        assert!(body.response_text().is_none());
    }

    #[tokio::test]
    async fn decode_json_rejects_non_json() {
        let err = decode_json::<GradeAnswerResponse>(mock_response(200, "<html>oops</html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(ref msg) if msg.contains("<html>oops</html>")));
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 121);
        assert!(p.ends_with('…'));
        assert_eq!(preview("short"), "short");
    }
}
