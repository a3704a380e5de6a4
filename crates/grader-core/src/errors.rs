//! Cross-cutting error types for AutoGrader.
//!
//! Crate-specific errors (`ConfigError`, `ClientError`, `ConsoleError`) live in
//! their own crates. The binary converges them through `anyhow`.

use thiserror::Error;

use crate::enums::{ActionKind, ActionPhase};

/// Errors that can be raised by any AutoGrader crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An action phase change that the state machine does not allow.
    #[error("Invalid state transition: {action} from {from} to {to}")]
    InvalidTransition {
        action: ActionKind,
        from: ActionPhase,
        to: ActionPhase,
    },

    /// Input failed validation (unknown field name, malformed value).
    #[error("Validation error: {0}")]
    Validation(String),
}
