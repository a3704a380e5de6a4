//! Console error types.

use grader_core::{ActionKind, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The action's previous request has not settled yet.
    #[error("{0} is already in progress")]
    ActionPending(ActionKind),

    /// The console has been torn down and accepts no further actions.
    #[error("console has been closed")]
    Unmounted,

    #[error(transparent)]
    Core(#[from] CoreError),
}
