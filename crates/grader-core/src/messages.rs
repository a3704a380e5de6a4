//! Fixed user-facing texts and initial field values.

/// Toast shown after an upload whose response carries no usable `message`.
pub const UPLOAD_DEFAULT_SUCCESS: &str = "Rubric uploaded successfully.";

/// Error shown for every failed rubric upload.
pub const UPLOAD_FAILED: &str = "Upload failed. Check the backend server status.";

/// Preview text used when a grading response carries no usable `response`.
pub const GRADING_NO_RESPONSE: &str = "No response returned from model.";

/// Toast shown after every successful grading call.
pub const GRADING_COMPLETE: &str = "LLM grading complete.";

/// Error shown for every failed grading call.
pub const GRADING_FAILED: &str = "Grading failed. Confirm the rubric is uploaded.";

pub const EMBED_BUTTON: &str = "Embed rubric";
pub const EMBED_BUTTON_BUSY: &str = "Uploading…";
pub const GRADE_BUTTON: &str = "Grade with AutoGrader.ai";
pub const GRADE_BUTTON_BUSY: &str = "Grading…";

/// Lifetime of a toast, in milliseconds.
pub const TOAST_TTL_MS: u64 = 3600;

pub const DEFAULT_NAMESPACE_ID: &str = "demo-user";
pub const DEFAULT_QUESTION_PROMPT: &str =
    "What are the 3 pillars of Object Oriented Programming?";
pub const DEFAULT_RUBRIC_TEXT: &str =
    "Paste your rubric text here. The backend will embed it for retrieval.";
pub const DEFAULT_STUDENT_ANSWER: &str = "Type or paste the student's answer here.";
