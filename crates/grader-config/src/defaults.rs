//! Initial values of the console fields.

use grader_core::{SessionFields, messages};
use serde::{Deserialize, Serialize};

fn namespace_id() -> String {
    messages::DEFAULT_NAMESPACE_ID.to_string()
}

fn question_prompt() -> String {
    messages::DEFAULT_QUESTION_PROMPT.to_string()
}

fn rubric_text() -> String {
    messages::DEFAULT_RUBRIC_TEXT.to_string()
}

fn student_answer() -> String {
    messages::DEFAULT_STUDENT_ANSWER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "namespace_id")]
    pub namespace_id: String,
    #[serde(default = "question_prompt")]
    pub question_prompt: String,
    #[serde(default = "rubric_text")]
    pub rubric_text: String,
    #[serde(default = "student_answer")]
    pub student_answer: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            namespace_id: namespace_id(),
            question_prompt: question_prompt(),
            rubric_text: rubric_text(),
            student_answer: student_answer(),
        }
    }
}

impl DefaultsConfig {
    /// Session fields a freshly mounted console starts with.
    #[must_use]
    pub fn session_fields(&self) -> SessionFields {
        SessionFields {
            namespace_id: self.namespace_id.clone(),
            question_prompt: self.question_prompt.clone(),
            rubric_text: self.rubric_text.clone(),
            student_answer: self.student_answer.clone(),
        }
    }
}
