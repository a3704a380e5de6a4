//! Action, phase and tone enums for the grading console.
//!
//! All enums use `snake_case` serialization. [`ActionPhase`] carries its state
//! machine through `allowed_next_states()` so the console can refuse invalid
//! transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::messages;

// ---------------------------------------------------------------------------
// ToastTone
// ---------------------------------------------------------------------------

/// Visual tone of a transient notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastTone {
    #[default]
    Neutral,
    Success,
}

impl ToastTone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for ToastTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// The two remote actions a console can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EmbedRubric,
    GradeAnswer,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmbedRubric => "embed_rubric",
            Self::GradeAnswer => "grade_answer",
        }
    }

    /// Backend route the action posts to.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::EmbedRubric => "/upload-text",
            Self::GradeAnswer => "/grade-answer",
        }
    }

    /// Fixed error text shown for any failure of this action.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::EmbedRubric => messages::UPLOAD_FAILED,
            Self::GradeAnswer => messages::GRADING_FAILED,
        }
    }

    /// Label of the button that triggers this action.
    #[must_use]
    pub const fn button_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::EmbedRubric, false) => messages::EMBED_BUTTON,
            (Self::EmbedRubric, true) => messages::EMBED_BUTTON_BUSY,
            (Self::GradeAnswer, false) => messages::GRADE_BUTTON,
            (Self::GradeAnswer, true) => messages::GRADE_BUTTON_BUSY,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionPhase
// ---------------------------------------------------------------------------

/// Lifecycle of one action button.
///
/// ```text
/// idle → pending → succeeded → idle
///                → failed    → idle
/// ```
///
/// There is no cancelled state: once pending, a request always settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl ActionPhase {
    /// Return the set of phases reachable from the current phase.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Pending],
            Self::Pending => &[Self::Succeeded, Self::Failed],
            Self::Succeeded | Self::Failed => &[Self::Idle],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the triggering control is disabled in this phase.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
