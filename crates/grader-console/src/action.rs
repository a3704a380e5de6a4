//! Per-button action slots.
//!
//! A slot tracks one button's [`ActionPhase`] and hands out a [`Ticket`] for
//! every request it starts. Settling requires the ticket of the request that is
//! currently pending, so a late answer to an older request can never overwrite
//! newer state.

use grader_core::{ActionKind, ActionPhase, CoreError};
use serde::{Deserialize, Serialize};

use crate::ConsoleError;

/// Proof that a request was started by a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub action: ActionKind,
    pub id: u64,
}

/// How a settled request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Succeeded,
    Failed,
}

impl Settlement {
    const fn phase(self) -> ActionPhase {
        match self {
            Self::Succeeded => ActionPhase::Succeeded,
            Self::Failed => ActionPhase::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSlot {
    action: ActionKind,
    phase: ActionPhase,
    issued: u64,
}

impl ActionSlot {
    #[must_use]
    pub const fn new(action: ActionKind) -> Self {
        Self {
            action,
            phase: ActionPhase::Idle,
            issued: 0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ActionPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Move to `Pending` and issue a ticket for the new request.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ActionPending`] while an earlier request of this
    /// slot is still in flight.
    pub fn begin(&mut self) -> Result<Ticket, ConsoleError> {
        if self.is_busy() {
            return Err(ConsoleError::ActionPending(self.action));
        }
        self.transition(ActionPhase::Pending)?;
        self.issued += 1;
        Ok(Ticket {
            action: self.action,
            id: self.issued,
        })
    }

    /// Settle the pending request identified by `ticket` and return to `Idle`.
    ///
    /// Returns `false`, leaving the slot untouched, when `ticket` is not the
    /// one currently pending.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the phase machine refuses a
    /// step, which only happens if the slot was corrupted.
    pub fn settle(&mut self, ticket: Ticket, settlement: Settlement) -> Result<bool, CoreError> {
        if ticket.action != self.action || ticket.id != self.issued || !self.is_busy() {
            return Ok(false);
        }
        self.transition(settlement.phase())?;
        self.transition(ActionPhase::Idle)?;
        Ok(true)
    }

    fn transition(&mut self, next: ActionPhase) -> Result<(), CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                action: self.action,
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_then_settle_round_trip() {
        let mut slot = ActionSlot::new(ActionKind::EmbedRubric);
        assert!(!slot.is_busy());

        let ticket = slot.begin().unwrap();
        assert!(slot.is_busy());
        assert_eq!(slot.phase(), ActionPhase::Pending);

        assert!(slot.settle(ticket, Settlement::Failed).unwrap());
        assert!(!slot.is_busy());
        assert_eq!(slot.phase(), ActionPhase::Idle);
    }

    #[test]
    fn second_begin_while_pending_is_rejected() {
        let mut slot = ActionSlot::new(ActionKind::GradeAnswer);
        let _ticket = slot.begin().unwrap();
        let err = slot.begin().unwrap_err();
        assert!(matches!(err, ConsoleError::ActionPending(ActionKind::GradeAnswer)));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut slot = ActionSlot::new(ActionKind::GradeAnswer);
        let first = slot.begin().unwrap();
        assert!(slot.settle(first, Settlement::Succeeded).unwrap());

        let second = slot.begin().unwrap();
        assert!(!slot.settle(first, Settlement::Failed).unwrap());
        assert!(slot.is_busy());
        assert!(slot.settle(second, Settlement::Succeeded).unwrap());
    }

    #[test]
    fn ticket_from_other_slot_is_ignored() {
        let mut upload = ActionSlot::new(ActionKind::EmbedRubric);
        let mut grading = ActionSlot::new(ActionKind::GradeAnswer);
        let upload_ticket = upload.begin().unwrap();
        let _grading_ticket = grading.begin().unwrap();

        assert!(!grading.settle(upload_ticket, Settlement::Succeeded).unwrap());
        assert!(grading.is_busy());
    }
}
