//! # grader-core
//!
//! Core types shared by every AutoGrader crate.
//!
//! - Session fields bound to the console inputs
//! - JSON payloads exchanged with the grading backend
//! - Action, phase and toast-tone enums with their transition rules
//! - The fixed user-facing messages
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod fields;
pub mod messages;
pub mod wire;

pub use enums::{ActionKind, ActionPhase, ToastTone};
pub use errors::CoreError;
pub use fields::{FieldId, SessionFields};
pub use wire::{GradeAnswerRequest, GradeAnswerResponse, UploadTextRequest, UploadTextResponse};
