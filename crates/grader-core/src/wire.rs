//! JSON payloads exchanged with the grading backend.
//!
//! Response bodies are not schema-validated: only the optional text field of
//! each response is read, and anything else in the body is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::messages;

/// Body of `POST /upload-text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTextRequest {
    pub user_id: String,
    pub text: String,
    /// Source name stored with each chunk. The console never sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl UploadTextRequest {
    #[must_use]
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            filename: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Success body of `POST /upload-text` (and `/upload-rubric`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTextResponse {
    #[serde(default)]
    pub message: Option<Value>,
}

impl UploadTextResponse {
    /// The server message, when present and non-empty.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().and_then(truthy_text)
    }

    /// Text for the success toast, falling back to the default confirmation.
    #[must_use]
    pub fn toast_text(&self) -> String {
        self.message_text()
            .unwrap_or_else(|| messages::UPLOAD_DEFAULT_SUCCESS.to_string())
    }
}

/// Body of `POST /grade-answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeAnswerRequest {
    pub user_id: String,
    pub question: String,
    pub student_response: String,
}

/// Success body of `POST /grade-answer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeAnswerResponse {
    #[serde(default)]
    pub response: Option<Value>,
}

impl GradeAnswerResponse {
    #[must_use]
    pub fn response_text(&self) -> Option<String> {
        self.response.as_ref().and_then(truthy_text)
    }

    /// Text for the preview dialog, falling back to the no-response notice.
    #[must_use]
    pub fn preview_text(&self) -> String {
        self.response_text()
            .unwrap_or_else(|| messages::GRADING_NO_RESPONSE.to_string())
    }
}

/// Reads an optional response field with the form's truthiness rule.
///
/// `null`, `false`, `0` and `""` count as absent. Strings are returned as-is;
/// any other value is rendered as its JSON text.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn upload_request_omits_absent_filename() {
        let req = UploadTextRequest::new("demo-user", "rubric");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "user_id": "demo-user", "text": "rubric" }));

        let named = req.with_filename("rubric.txt");
        let json = serde_json::to_value(&named).unwrap();
        assert_eq!(json["filename"], "rubric.txt");
    }

    #[test]
    fn grade_request_field_names() {
        let req = GradeAnswerRequest {
            user_id: "u".into(),
            question: "q".into(),
            student_response: "a".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user_id": "u", "question": "q", "student_response": "a" })
        );
    }

    #[test]
    fn upload_message_is_used_verbatim() {
        let body: UploadTextResponse =
            serde_json::from_str(r#"{ "message": "Rubric uploaded successfully." }"#).unwrap();
        assert_eq!(body.toast_text(), "Rubric uploaded successfully.");

        let body: UploadTextResponse =
            serde_json::from_str(r#"{ "message": "Stored 4 chunks" }"#).unwrap();
        assert_eq!(body.toast_text(), "Stored 4 chunks");
    }

    #[rstest]
    #[case("{}")]
    #[case(r#"{ "message": null }"#)]
    #[case(r#"{ "message": "" }"#)]
    #[case(r#"{ "message": false }"#)]
    #[case(r#"{ "message": 0 }"#)]
    fn upload_message_falls_back(#[case] body: &str) {
        let body: UploadTextResponse = serde_json::from_str(body).unwrap();
        assert_eq!(body.toast_text(), "Rubric uploaded successfully.");
    }

    #[test]
    fn grade_response_is_used_verbatim() {
        let body: GradeAnswerResponse =
            serde_json::from_str(r#"{ "response": "Score: 9/10" }"#).unwrap();
        assert_eq!(body.preview_text(), "Score: 9/10");
    }

    #[test]
    fn grade_response_falls_back_when_missing() {
        let body: GradeAnswerResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.preview_text(), "No response returned from model.");
    }

    #[test]
    fn non_string_values_render_as_json() {
        let body: GradeAnswerResponse =
            serde_json::from_str(r#"{ "response": { "score": 7 } }"#).unwrap();
        assert_eq!(body.preview_text(), r#"{"score":7}"#);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body: GradeAnswerResponse =
            serde_json::from_str(r#"{ "response": "ok", "latency_ms": 812 }"#).unwrap();
        assert_eq!(body.response_text().as_deref(), Some("ok"));
    }
}
