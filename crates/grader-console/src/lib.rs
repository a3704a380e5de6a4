//! # grader-console
//!
//! The grading console: four text fields, two action buttons, a transient
//! toast, an error line and a preview dialog for the model's response.
//!
//! [`ConsoleState`] holds every piece of state and is only changed through its
//! handlers. [`GradingConsole`] wraps it for async use: an action takes the
//! lock to start, releases it while the request is in flight, and takes it
//! again to settle. A button stays busy until its request settles, a second
//! press meanwhile is refused, and results that arrive after teardown are
//! dropped.

pub mod action;
pub mod backend;
pub mod console;
pub mod state;
pub mod toast;
pub mod view;

mod error;

pub use action::{ActionSlot, Settlement, Ticket};
pub use backend::GradingBackend;
pub use console::GradingConsole;
pub use error::ConsoleError;
pub use state::{ActionOutcome, ConsoleState, OutcomeStatus};
pub use toast::Toast;
pub use view::{ConsoleSnapshot, ToastView, render};
