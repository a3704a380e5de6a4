//! The four text fields bound to the console inputs.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::CoreError,
    messages,
    wire::{GradeAnswerRequest, UploadTextRequest},
};

/// Mutable text fields of one console session.
///
/// No field is validated beyond being a string: empty values are sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFields {
    /// Namespace the backend stores rubric vectors under (user or course id).
    pub namespace_id: String,
    pub question_prompt: String,
    pub rubric_text: String,
    pub student_answer: String,
}

impl Default for SessionFields {
    fn default() -> Self {
        Self {
            namespace_id: messages::DEFAULT_NAMESPACE_ID.to_string(),
            question_prompt: messages::DEFAULT_QUESTION_PROMPT.to_string(),
            rubric_text: messages::DEFAULT_RUBRIC_TEXT.to_string(),
            student_answer: messages::DEFAULT_STUDENT_ANSWER.to_string(),
        }
    }
}

impl SessionFields {
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::NamespaceId => &self.namespace_id,
            FieldId::QuestionPrompt => &self.question_prompt,
            FieldId::RubricText => &self.rubric_text,
            FieldId::StudentAnswer => &self.student_answer,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::NamespaceId => &mut self.namespace_id,
            FieldId::QuestionPrompt => &mut self.question_prompt,
            FieldId::RubricText => &mut self.rubric_text,
            FieldId::StudentAnswer => &mut self.student_answer,
        };
        *slot = value.into();
    }

    /// Payload for `POST /upload-text`.
    #[must_use]
    pub fn upload_request(&self) -> UploadTextRequest {
        UploadTextRequest::new(&self.namespace_id, &self.rubric_text)
    }

    /// Payload for `POST /grade-answer`.
    #[must_use]
    pub fn grade_request(&self) -> GradeAnswerRequest {
        GradeAnswerRequest {
            user_id: self.namespace_id.clone(),
            question: self.question_prompt.clone(),
            student_response: self.student_answer.clone(),
        }
    }
}

/// Identifies one of the [`SessionFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    NamespaceId,
    QuestionPrompt,
    RubricText,
    StudentAnswer,
}

impl FieldId {
    pub const ALL: [Self; 4] = [
        Self::NamespaceId,
        Self::QuestionPrompt,
        Self::RubricText,
        Self::StudentAnswer,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NamespaceId => "namespace",
            Self::QuestionPrompt => "question",
            Self::RubricText => "rubric",
            Self::StudentAnswer => "answer",
        }
    }

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NamespaceId => "User / course id",
            Self::QuestionPrompt => "Question prompt",
            Self::RubricText => "Rubric",
            Self::StudentAnswer => "Student answer",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "namespace" | "namespace_id" | "user" | "user_id" => Ok(Self::NamespaceId),
            "question" | "prompt" => Ok(Self::QuestionPrompt),
            "rubric" => Ok(Self::RubricText),
            "answer" | "student_answer" => Ok(Self::StudentAnswer),
            other => Err(CoreError::Validation(format!(
                "unknown field '{other}' (expected one of: namespace, question, rubric, answer)"
            ))),
        }
    }
}
