//! Shared, async-facing handle over [`ConsoleState`].

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use grader_config::GraderConfig;
use grader_core::{ActionKind, FieldId};

use crate::{
    ConsoleError, GradingBackend,
    state::{ActionOutcome, ConsoleState},
    view::ConsoleSnapshot,
};

/// One grading console session bound to a backend.
///
/// Cheap to clone; clones share state, so an action can run on a spawned task
/// while another clone keeps handling input.
pub struct GradingConsole<B> {
    state: Arc<Mutex<ConsoleState>>,
    backend: Arc<B>,
    toast_ttl: Duration,
}

impl<B> Clone for GradingConsole<B> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            backend: Arc::clone(&self.backend),
            toast_ttl: self.toast_ttl,
        }
    }
}

impl<B: GradingBackend> GradingConsole<B> {
    /// Start a session with fields and toast lifetime taken from `config`.
    #[must_use]
    pub fn new(backend: B, config: &GraderConfig) -> Self {
        let toast_ttl = config.console.toast_ttl();
        let state = ConsoleState::new(config.defaults.session_fields(), toast_ttl);
        Self::with_state(backend, state, toast_ttl)
    }

    #[must_use]
    pub fn with_state(backend: B, state: ConsoleState, toast_ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            backend: Arc::new(backend),
            toast_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How long a toast stays visible.
    #[must_use]
    pub const fn toast_ttl(&self) -> Duration {
        self.toast_ttl
    }

    /// Replace one text field.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unmounted`] after [`Self::teardown`].
    pub fn edit(&self, field: FieldId, value: impl Into<String>) -> Result<(), ConsoleError> {
        self.lock().edit(field, value)
    }

    /// Send the rubric text to `POST /upload-text`.
    ///
    /// Backend failures are not errors here: they settle into the console's
    /// error line and come back as a failed [`ActionOutcome`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ActionPending`] if an upload is already running,
    /// or [`ConsoleError::Unmounted`] after teardown.
    pub async fn embed_rubric(&self) -> Result<ActionOutcome, ConsoleError> {
        let (ticket, request) = self.lock().begin_upload()?;
        let result = self.backend.submit_rubric(request).await;
        self.lock().settle_upload(ticket, result, Instant::now())
    }

    /// Send the question and answer to `POST /grade-answer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ActionPending`] if grading is already running,
    /// or [`ConsoleError::Unmounted`] after teardown.
    pub async fn grade_answer(&self) -> Result<ActionOutcome, ConsoleError> {
        let (ticket, request) = self.lock().begin_grade()?;
        let result = self.backend.submit_answer(request).await;
        self.lock().settle_grade(ticket, result, Instant::now())
    }

    /// Run `action` by kind.
    ///
    /// # Errors
    ///
    /// See [`Self::embed_rubric`] and [`Self::grade_answer`].
    pub async fn run(&self, action: ActionKind) -> Result<ActionOutcome, ConsoleError> {
        match action {
            ActionKind::EmbedRubric => self.embed_rubric().await,
            ActionKind::GradeAnswer => self.grade_answer().await,
        }
    }

    pub fn close_dialog(&self) {
        self.lock().close_dialog();
    }

    /// Drop the toast if it has expired by now.
    pub fn tick(&self) {
        self.lock().tick(Instant::now());
    }

    #[must_use]
    pub fn is_busy(&self, action: ActionKind) -> bool {
        self.lock().is_busy(action)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lock().is_mounted()
    }

    #[must_use]
    pub fn snapshot(&self) -> ConsoleSnapshot {
        self.lock().snapshot(Instant::now())
    }

    /// Close the session. In-flight requests still complete on the wire but
    /// their results are dropped.
    pub fn teardown(&self) {
        self.lock().unmount();
    }
}
