//! Confirmation steps for irreversible or lock-overriding actions.
//!
//! A guarded action starts with [`ConfirmationRegistry::request`], which hands
//! out a single-use ticket. Each call to [`ConfirmationRegistry::confirm`]
//! consumes one step. When the last step is consumed the caller receives a
//! [`Confirmed`] proof, the only way to obtain one, and the service requires it
//! to unlock or delete a repair.

use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::LifecycleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardedAction {
    Unlock,
    Delete,
}

impl GuardedAction {
    pub fn required_confirmations(self) -> u8 {
        match self {
            GuardedAction::Unlock => 1,
            GuardedAction::Delete => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingAction {
    repair_id: i32,
    action: GuardedAction,
    remaining: u8,
}

/// Handed to the UI; the ticket id must be echoed back on every confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationTicket {
    pub ticket: Uuid,
    pub repair_id: i32,
    pub action: GuardedAction,
    pub confirmations_remaining: u8,
}

/// Proof that every confirmation step of an action was completed.
#[derive(Debug)]
pub struct Confirmed {
    repair_id: i32,
    action: GuardedAction,
}

impl Confirmed {
    pub fn repair_id(&self) -> i32 {
        self.repair_id
    }

    pub fn action(&self) -> GuardedAction {
        self.action
    }
}

#[derive(Debug)]
pub enum ConfirmOutcome {
    Pending(ConfirmationTicket),
    Confirmed(Confirmed),
}

/// Outstanding tickets, expiring after a fixed time to live.
pub struct ConfirmationRegistry {
    pending: Cache<Uuid, PendingAction>,
}

impl ConfirmationRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(1_000)
                .build(),
        }
    }

    pub async fn request(&self, repair_id: i32, action: GuardedAction) -> ConfirmationTicket {
        let ticket = Uuid::new_v4();
        let pending = PendingAction {
            repair_id,
            action,
            remaining: action.required_confirmations(),
        };
        self.pending.insert(ticket, pending).await;

        ConfirmationTicket {
            ticket,
            repair_id,
            action,
            confirmations_remaining: pending.remaining,
        }
    }

    /// Consume one confirmation step.
    ///
    /// A ticket presented for the wrong repair or action is discarded.
    pub async fn confirm(
        &self,
        ticket: Uuid,
        repair_id: i32,
        action: GuardedAction,
    ) -> Result<ConfirmOutcome, LifecycleError> {
        let mut pending = self.pending.remove(&ticket).await.ok_or_else(|| {
            LifecycleError::Confirmation("confirmation ticket is unknown or expired".to_string())
        })?;

        if pending.repair_id != repair_id || pending.action != action {
            return Err(LifecycleError::Confirmation(
                "confirmation ticket does not match this action".to_string(),
            ));
        }

        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining == 0 {
            return Ok(ConfirmOutcome::Confirmed(Confirmed { repair_id, action }));
        }

        self.pending.insert(ticket, pending).await;
        Ok(ConfirmOutcome::Pending(ConfirmationTicket {
            ticket,
            repair_id,
            action,
            confirmations_remaining: pending.remaining,
        }))
    }

    pub async fn cancel(&self, ticket: Uuid) {
        self.pending.invalidate(&ticket).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConfirmationRegistry {
        ConfirmationRegistry::new(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn unlock_needs_one_step() {
        let registry = registry();
        let ticket = registry.request(7, GuardedAction::Unlock).await;
        assert_eq!(ticket.confirmations_remaining, 1);

        let outcome = registry
            .confirm(ticket.ticket, 7, GuardedAction::Unlock)
            .await
            .unwrap();
        match outcome {
            ConfirmOutcome::Confirmed(proof) => {
                assert_eq!(proof.repair_id(), 7);
                assert_eq!(proof.action(), GuardedAction::Unlock);
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_needs_two_steps() {
        let registry = registry();
        let ticket = registry.request(7, GuardedAction::Delete).await;
        assert_eq!(ticket.confirmations_remaining, 2);

        let first = registry
            .confirm(ticket.ticket, 7, GuardedAction::Delete)
            .await
            .unwrap();
        assert!(matches!(
            first,
            ConfirmOutcome::Pending(ConfirmationTicket { confirmations_remaining: 1, .. })
        ));

        let second = registry
            .confirm(ticket.ticket, 7, GuardedAction::Delete)
            .await
            .unwrap();
        assert!(matches!(second, ConfirmOutcome::Confirmed(_)));
    }

    #[tokio::test]
    async fn tickets_are_single_use() {
        let registry = registry();
        let ticket = registry.request(7, GuardedAction::Unlock).await;
        registry
            .confirm(ticket.ticket, 7, GuardedAction::Unlock)
            .await
            .unwrap();

        let again = registry.confirm(ticket.ticket, 7, GuardedAction::Unlock).await;
        assert!(matches!(again, Err(LifecycleError::Confirmation(_))));
    }

    #[tokio::test]
    async fn mismatched_ticket_is_burned() {
        let registry = registry();
        let ticket = registry.request(7, GuardedAction::Delete).await;

        let wrong = registry.confirm(ticket.ticket, 8, GuardedAction::Delete).await;
        assert!(matches!(wrong, Err(LifecycleError::Confirmation(_))));

        let retry = registry.confirm(ticket.ticket, 7, GuardedAction::Delete).await;
        assert!(matches!(retry, Err(LifecycleError::Confirmation(_))));
    }

    #[tokio::test]
    async fn cancelled_ticket_cannot_confirm() {
        let registry = registry();
        let ticket = registry.request(7, GuardedAction::Delete).await;
        registry.cancel(ticket.ticket).await;

        let outcome = registry.confirm(ticket.ticket, 7, GuardedAction::Delete).await;
        assert!(outcome.is_err());
    }
}
