//! Status transition rule.
//!
//! Any status may follow any other. Entering `picked-up` locks the repair;
//! every other target status leaves it unlocked, whatever the previous flag.

use serde::Serialize;

use crate::models::repairs::{self, RepairStatus};

/// Outcome of a status change, written back as one persistence update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub status: RepairStatus,
    pub is_unlocked: bool,
}

pub fn transition(_current: &repairs::Model, requested: RepairStatus) -> Transition {
    Transition {
        status: requested,
        is_unlocked: requested != RepairStatus::PickedUp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::fixtures::repair;

    #[test]
    fn unlock_flag_follows_requested_status_only() {
        for from in RepairStatus::ALL {
            for prior_unlocked in [true, false] {
                for to in RepairStatus::ALL {
                    let mut current = repair();
                    current.status = from;
                    current.is_unlocked = prior_unlocked;

                    let next = transition(&current, to);
                    assert_eq!(next.status, to);
                    assert_eq!(next.is_unlocked, to != RepairStatus::PickedUp);
                }
            }
        }
    }

    #[test]
    fn backwards_moves_are_allowed() {
        let mut current = repair();
        current.status = RepairStatus::Completed;

        let next = transition(&current, RepairStatus::PendingDiagnosis);
        assert_eq!(next.status, RepairStatus::PendingDiagnosis);
        assert!(next.is_unlocked);
    }
}
