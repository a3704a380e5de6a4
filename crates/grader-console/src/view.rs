//! Serializable console snapshot and its plain-text rendering.

use std::fmt::Write as _;

use grader_core::{ActionKind, FieldId, SessionFields, ToastTone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastView {
    pub message: String,
    pub tone: ToastTone,
}

/// Point-in-time view of the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    pub fields: SessionFields,
    pub uploading: bool,
    pub grading: bool,
    pub toast: Option<ToastView>,
    pub error: Option<String>,
    pub preview_text: String,
    pub dialog_visible: bool,
}

impl ConsoleSnapshot {
    #[must_use]
    pub const fn embed_label(&self) -> &'static str {
        ActionKind::EmbedRubric.button_label(self.uploading)
    }

    #[must_use]
    pub const fn grade_label(&self) -> &'static str {
        ActionKind::GradeAnswer.button_label(self.grading)
    }
}

/// Render `snapshot` as terminal text.
///
/// Panels come in form order: rubric, prompt and identity, student answer.
/// The status area lists the error line before the toast line.
#[must_use]
pub fn render(snapshot: &ConsoleSnapshot) -> String {
    let mut out = String::new();
    let fields = &snapshot.fields;

    let _ = writeln!(out, "AutoGrader.ai  (RAG-powered grading)");
    let _ = writeln!(out);

    panel_head(&mut out, "Rubric", Some(snapshot.embed_label()));
    block(&mut out, fields.get(FieldId::RubricText));

    panel_head(&mut out, "Prompt & Identity", None);
    for field in [FieldId::NamespaceId, FieldId::QuestionPrompt] {
        let _ = writeln!(out, "  {}: {}", field.label(), fields.get(field));
    }

    panel_head(&mut out, "Student answer", Some(snapshot.grade_label()));
    block(&mut out, fields.get(FieldId::StudentAnswer));

    if snapshot.error.is_some() || snapshot.toast.is_some() {
        let _ = writeln!(out);
        if let Some(error) = &snapshot.error {
            let _ = writeln!(out, "⚠️ {error}");
        }
        if let Some(toast) = &snapshot.toast {
            let _ = writeln!(out, "{}", toast.message);
        }
    }

    if snapshot.dialog_visible {
        let _ = writeln!(out);
        let _ = writeln!(out, "┌ Preview: Model response");
        for line in snapshot.preview_text.lines() {
            let _ = writeln!(out, "│ {line}");
        }
        let _ = writeln!(out, "└ [Close]  (type `close`)");
    }

    out
}

fn panel_head(out: &mut String, title: &str, button: Option<&str>) {
    let _ = writeln!(out);
    match button {
        Some(label) => {
            let _ = writeln!(out, "{title}  [{label}]");
        }
        None => {
            let _ = writeln!(out, "{title}");
        }
    }
}

fn block(out: &mut String, text: &str) {
    if text.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for line in text.lines() {
        let _ = writeln!(out, "  {line}");
    }
}
