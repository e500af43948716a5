//! Lock gate.
//!
//! The only place that decides whether a repair may be edited. Both the
//! `is_locked` flag sent to the UI and the refusal of mutations go through
//! [`lock_state`].

use serde::Serialize;

use crate::lifecycle::LifecycleError;
use crate::models::repairs::{self, RepairStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Locked,
    Unlocked,
}

pub fn lock_state(status: RepairStatus, is_unlocked: bool) -> LockState {
    if status == RepairStatus::PickedUp && !is_unlocked {
        LockState::Locked
    } else {
        LockState::Unlocked
    }
}

pub fn is_locked(repair: &repairs::Model) -> bool {
    lock_state(repair.status, repair.is_unlocked) == LockState::Locked
}

/// Refuse any mutation of a locked repair.
pub fn ensure_editable(repair: &repairs::Model) -> Result<(), LifecycleError> {
    if is_locked(repair) {
        return Err(LifecycleError::Locked { id: repair.id });
    }
    Ok(())
}
