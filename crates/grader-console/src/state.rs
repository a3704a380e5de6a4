//! Explicit console state and the handlers that mutate it.
//!
//! Every change goes through a method on [`ConsoleState`]. Network calls happen
//! outside: `begin_*` hands back the request to send, `settle_*` takes the
//! result. Nothing here blocks or awaits.

use std::time::{Duration, Instant};

use grader_client::ClientError;
use grader_core::{
    ActionKind, FieldId, GradeAnswerRequest, GradeAnswerResponse, SessionFields, ToastTone,
    UploadTextRequest, UploadTextResponse, messages,
};
use serde::{Deserialize, Serialize};

use crate::{
    ConsoleError,
    action::{ActionSlot, Settlement, Ticket},
    toast::Toast,
    view::{ConsoleSnapshot, ToastView},
};

/// How one request ended from the console's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    /// The result arrived after the console was torn down or after a newer
    /// request took over; state was left untouched.
    Discarded,
}

/// Result of one action, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: ActionKind,
    pub status: OutcomeStatus,
    /// Toast text on success, fixed error text on failure.
    pub message: Option<String>,
    /// Model response shown in the dialog (grading only).
    pub preview: Option<String>,
}

impl ActionOutcome {
    const fn discarded(action: ActionKind) -> Self {
        Self {
            action,
            status: OutcomeStatus::Discarded,
            message: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    fields: SessionFields,
    upload: ActionSlot,
    grading: ActionSlot,
    toast: Option<Toast>,
    error: Option<String>,
    preview_text: String,
    dialog_visible: bool,
    mounted: bool,
    toast_ttl: Duration,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(
            SessionFields::default(),
            Duration::from_millis(messages::TOAST_TTL_MS),
        )
    }
}

impl ConsoleState {
    #[must_use]
    pub const fn new(fields: SessionFields, toast_ttl: Duration) -> Self {
        Self {
            fields,
            upload: ActionSlot::new(ActionKind::EmbedRubric),
            grading: ActionSlot::new(ActionKind::GradeAnswer),
            toast: None,
            error: None,
            preview_text: String::new(),
            dialog_visible: false,
            mounted: true,
            toast_ttl,
        }
    }

    #[must_use]
    pub const fn fields(&self) -> &SessionFields {
        &self.fields
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn is_busy(&self, action: ActionKind) -> bool {
        self.slot(action).is_busy()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn preview_text(&self) -> &str {
        &self.preview_text
    }

    #[must_use]
    pub const fn dialog_visible(&self) -> bool {
        self.dialog_visible
    }

    /// The toast, if one is still visible at `now`.
    #[must_use]
    pub fn toast_at(&self, now: Instant) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible_at(now))
    }

    const fn slot(&self, action: ActionKind) -> &ActionSlot {
        match action {
            ActionKind::EmbedRubric => &self.upload,
            ActionKind::GradeAnswer => &self.grading,
        }
    }

    const fn slot_mut(&mut self, action: ActionKind) -> &mut ActionSlot {
        match action {
            ActionKind::EmbedRubric => &mut self.upload,
            ActionKind::GradeAnswer => &mut self.grading,
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────

    /// Replace one text field.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unmounted`] after teardown.
    pub fn edit(&mut self, field: FieldId, value: impl Into<String>) -> Result<(), ConsoleError> {
        self.ensure_mounted()?;
        self.fields.set(field, value);
        Ok(())
    }

    /// Start a rubric upload: clear the error, mark the button busy and
    /// snapshot the request.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ActionPending`] if an upload is already in
    /// flight, or [`ConsoleError::Unmounted`] after teardown.
    pub fn begin_upload(&mut self) -> Result<(Ticket, UploadTextRequest), ConsoleError> {
        let ticket = self.begin(ActionKind::EmbedRubric)?;
        Ok((ticket, self.fields.upload_request()))
    }

    /// Start a grading call. Same rules as [`Self::begin_upload`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ActionPending`] if grading is already in
    /// flight, or [`ConsoleError::Unmounted`] after teardown.
    pub fn begin_grade(&mut self) -> Result<(Ticket, GradeAnswerRequest), ConsoleError> {
        let ticket = self.begin(ActionKind::GradeAnswer)?;
        Ok((ticket, self.fields.grade_request()))
    }

    /// Apply the result of an upload started with `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Core`] only if the phase machine is corrupted.
    pub fn settle_upload(
        &mut self,
        ticket: Ticket,
        result: Result<UploadTextResponse, ClientError>,
        now: Instant,
    ) -> Result<ActionOutcome, ConsoleError> {
        let settlement = if result.is_ok() {
            Settlement::Succeeded
        } else {
            Settlement::Failed
        };
        if !self.accept(ticket, settlement)? {
            return Ok(ActionOutcome::discarded(ActionKind::EmbedRubric));
        }

        match result {
            Ok(body) => {
                let message = body.toast_text();
                tracing::info!(%message, "rubric uploaded");
                self.show_toast(message.clone(), ToastTone::Success, now);
                Ok(ActionOutcome {
                    action: ActionKind::EmbedRubric,
                    status: OutcomeStatus::Succeeded,
                    message: Some(message),
                    preview: None,
                })
            }
            Err(error) => Ok(self.fail(ActionKind::EmbedRubric, &error)),
        }
    }

    /// Apply the result of a grading call started with `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Core`] only if the phase machine is corrupted.
    pub fn settle_grade(
        &mut self,
        ticket: Ticket,
        result: Result<GradeAnswerResponse, ClientError>,
        now: Instant,
    ) -> Result<ActionOutcome, ConsoleError> {
        let settlement = if result.is_ok() {
            Settlement::Succeeded
        } else {
            Settlement::Failed
        };
        if !self.accept(ticket, settlement)? {
            return Ok(ActionOutcome::discarded(ActionKind::GradeAnswer));
        }

        match result {
            Ok(body) => {
                self.preview_text = body.preview_text();
                self.dialog_visible = true;
                tracing::info!(chars = self.preview_text.len(), "grading complete");
                self.show_toast(messages::GRADING_COMPLETE, ToastTone::Success, now);
                Ok(ActionOutcome {
                    action: ActionKind::GradeAnswer,
                    status: OutcomeStatus::Succeeded,
                    message: Some(messages::GRADING_COMPLETE.to_string()),
                    preview: Some(self.preview_text.clone()),
                })
            }
            Err(error) => Ok(self.fail(ActionKind::GradeAnswer, &error)),
        }
    }

    /// Hide the preview dialog. The preview text is kept.
    pub const fn close_dialog(&mut self) {
        self.dialog_visible = false;
    }

    /// Drop the toast once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| !t.is_visible_at(now)) {
            self.toast = None;
        }
    }

    /// Tear the console down. Results of in-flight requests will be discarded.
    pub fn unmount(&mut self) {
        if self.mounted {
            tracing::debug!(
                upload_pending = self.upload.is_busy(),
                grading_pending = self.grading.is_busy(),
                "console unmounted"
            );
        }
        self.mounted = false;
    }

    /// Everything a view needs to draw the console at `now`.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> ConsoleSnapshot {
        ConsoleSnapshot {
            fields: self.fields.clone(),
            uploading: self.upload.is_busy(),
            grading: self.grading.is_busy(),
            toast: self.toast_at(now).map(|t| ToastView {
                message: t.message.clone(),
                tone: t.tone,
            }),
            error: self.error.clone(),
            preview_text: self.preview_text.clone(),
            dialog_visible: self.dialog_visible,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────

    const fn ensure_mounted(&self) -> Result<(), ConsoleError> {
        if self.mounted {
            Ok(())
        } else {
            Err(ConsoleError::Unmounted)
        }
    }

    fn begin(&mut self, action: ActionKind) -> Result<Ticket, ConsoleError> {
        self.ensure_mounted()?;
        let ticket = self.slot_mut(action).begin()?;
        self.error = None;
        tracing::debug!(%action, ticket = ticket.id, route = action.route(), "request dispatched");
        Ok(ticket)
    }

    /// Settle the slot if the result still belongs to this console.
    fn accept(&mut self, ticket: Ticket, settlement: Settlement) -> Result<bool, ConsoleError> {
        if !self.mounted {
            tracing::debug!(action = %ticket.action, ticket = ticket.id, "result after unmount ignored");
            return Ok(false);
        }
        let applied = self.slot_mut(ticket.action).settle(ticket, settlement)?;
        if !applied {
            tracing::debug!(action = %ticket.action, ticket = ticket.id, "stale result ignored");
        }
        Ok(applied)
    }

    fn fail(&mut self, action: ActionKind, error: &ClientError) -> ActionOutcome {
        tracing::warn!(%action, %error, "request failed");
        let message = action.failure_message().to_string();
        self.error = Some(message.clone());
        ActionOutcome {
            action,
            status: OutcomeStatus::Failed,
            message: Some(message),
            preview: None,
        }
    }

    fn show_toast(&mut self, message: impl Into<String>, tone: ToastTone, now: Instant) {
        self.toast = Some(Toast::new(message, tone, now, self.toast_ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn upload_ok(message: Option<&str>) -> Result<UploadTextResponse, ClientError> {
        Ok(UploadTextResponse {
            message: message.map(|m| serde_json::Value::String(m.to_string())),
        })
    }

    fn grade_ok(response: Option<&str>) -> Result<GradeAnswerResponse, ClientError> {
        Ok(GradeAnswerResponse {
            response: response.map(|r| serde_json::Value::String(r.to_string())),
        })
    }

    fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        }
    }

    #[test]
    fn fresh_state_is_idle() {
        let state = ConsoleState::default();
        let now = Instant::now();
        assert!(state.is_mounted());
        assert!(!state.is_busy(ActionKind::EmbedRubric));
        assert!(!state.is_busy(ActionKind::GradeAnswer));
        assert!(state.toast_at(now).is_none());
        assert!(state.error().is_none());
        assert!(!state.dialog_visible());
        assert_eq!(state.preview_text(), "");
    }

    #[test]
    fn upload_success_shows_server_message() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, request) = state.begin_upload().unwrap();
        assert_eq!(request.user_id, "demo-user");
        assert!(state.is_busy(ActionKind::EmbedRubric));

        let outcome = state
            .settle_upload(ticket, upload_ok(Some("Rubric uploaded successfully.")), now)
            .unwrap();
        assert!(outcome.is_success());
        assert!(!state.is_busy(ActionKind::EmbedRubric));

        let toast = state.toast_at(now).unwrap();
        assert_eq!(toast.message, "Rubric uploaded successfully.");
        assert_eq!(toast.tone, ToastTone::Success);
        assert!(state.error().is_none());
    }

    #[test]
    fn upload_without_message_uses_default() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_upload().unwrap();
        state.settle_upload(ticket, upload_ok(None), now).unwrap();
        assert_eq!(
            state.toast_at(now).unwrap().message,
            "Rubric uploaded successfully."
        );
    }

    #[test]
    fn upload_failure_sets_fixed_error_and_no_toast() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_upload().unwrap();
        let outcome = state.settle_upload(ticket, Err(server_error()), now).unwrap();

        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(
            state.error(),
            Some("Upload failed. Check the backend server status.")
        );
        assert!(state.toast_at(now).is_none());
        assert!(!state.is_busy(ActionKind::EmbedRubric));
    }

    #[test]
    fn grade_success_opens_dialog_with_response() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        let outcome = state
            .settle_grade(ticket, grade_ok(Some("Score: 9/10")), now)
            .unwrap();

        assert_eq!(outcome.preview.as_deref(), Some("Score: 9/10"));
        assert!(state.dialog_visible());
        assert_eq!(state.preview_text(), "Score: 9/10");
        assert_eq!(state.toast_at(now).unwrap().message, "LLM grading complete.");
    }

    #[test]
    fn grade_without_response_shows_placeholder() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, grade_ok(None), now).unwrap();
        assert!(state.dialog_visible());
        assert_eq!(state.preview_text(), "No response returned from model.");
    }

    #[test]
    fn grade_failure_keeps_dialog_closed() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, Err(server_error()), now).unwrap();

        assert!(!state.dialog_visible());
        assert_eq!(
            state.error(),
            Some("Grading failed. Confirm the rubric is uploaded.")
        );
    }

    #[test]
    fn starting_an_action_clears_previous_error() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, Err(server_error()), now).unwrap();
        assert!(state.error().is_some());

        let _ = state.begin_upload().unwrap();
        assert!(state.error().is_none());
    }

    #[test]
    fn closing_dialog_keeps_preview_text() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, grade_ok(Some("2/3")), now).unwrap();

        state.close_dialog();
        assert!(!state.dialog_visible());
        assert_eq!(state.preview_text(), "2/3");

        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, grade_ok(Some("3/3")), now).unwrap();
        assert!(state.dialog_visible());
        assert_eq!(state.preview_text(), "3/3");
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut state = ConsoleState::new(SessionFields::default(), Duration::from_millis(3600));
        let t0 = Instant::now();
        let (ticket, _) = state.begin_upload().unwrap();
        state.settle_upload(ticket, upload_ok(Some("ok")), t0).unwrap();

        assert!(state.toast_at(t0 + Duration::from_millis(3599)).is_some());
        assert!(state.toast_at(t0 + Duration::from_millis(3600)).is_none());

        state.tick(t0 + Duration::from_millis(1000));
        assert!(state.toast_at(t0 + Duration::from_millis(1000)).is_some());
        state.tick(t0 + Duration::from_millis(4000));
        assert!(state.toast.is_none());
    }

    #[test]
    fn newer_toast_replaces_older_with_fresh_ttl() {
        let mut state = ConsoleState::default();
        let t0 = Instant::now();
        let (ticket, _) = state.begin_upload().unwrap();
        state.settle_upload(ticket, upload_ok(Some("first")), t0).unwrap();

        let t1 = t0 + Duration::from_millis(3000);
        let (ticket, _) = state.begin_grade().unwrap();
        state.settle_grade(ticket, grade_ok(Some("ok")), t1).unwrap();

        let later = t0 + Duration::from_millis(3700);
        assert_eq!(state.toast_at(later).unwrap().message, "LLM grading complete.");
    }

    #[test]
    fn edits_flow_into_next_request_only() {
        let mut state = ConsoleState::default();
        state.edit(FieldId::NamespaceId, "course-9").unwrap();
        let (ticket, request) = state.begin_grade().unwrap();
        assert_eq!(request.user_id, "course-9");

        // Editing while pending does not change the request already sent.
        state.edit(FieldId::StudentAnswer, "changed").unwrap();
        assert_eq!(request.student_response, "Type or paste the student's answer here.");
        state.settle_grade(ticket, grade_ok(Some("x")), Instant::now()).unwrap();
    }

    #[test]
    fn results_after_unmount_are_discarded() {
        let mut state = ConsoleState::default();
        let now = Instant::now();
        let (ticket, _) = state.begin_grade().unwrap();
        state.unmount();

        let outcome = state.settle_grade(ticket, grade_ok(Some("late")), now).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Discarded);
        assert!(!state.dialog_visible());
        assert_eq!(state.preview_text(), "");
        assert!(state.toast_at(now).is_none());
    }

    #[test]
    fn actions_after_unmount_are_rejected() {
        let mut state = ConsoleState::default();
        state.unmount();
        assert!(matches!(state.begin_upload(), Err(ConsoleError::Unmounted)));
        assert!(matches!(
            state.edit(FieldId::RubricText, "x"),
            Err(ConsoleError::Unmounted)
        ));
    }

    #[test]
    fn double_submit_is_rejected_without_side_effects() {
        let mut state = ConsoleState::default();
        let (ticket, _) = state.begin_upload().unwrap();
        let err = state.begin_upload().unwrap_err();
        assert!(matches!(err, ConsoleError::ActionPending(ActionKind::EmbedRubric)));
        assert!(state.is_busy(ActionKind::EmbedRubric));

        // The other button is independent.
        assert!(state.begin_grade().is_ok());
        state.settle_upload(ticket, upload_ok(None), Instant::now()).unwrap();
        assert!(!state.is_busy(ActionKind::EmbedRubric));
        assert!(state.is_busy(ActionKind::GradeAnswer));
    }
}
