//! Repair lifecycle and lock state machine.
//!
//! Pure rules live in [`status`], [`lock`], [`ledger`], [`compose`] and
//! [`validation`]. [`service::RepairService`] wires them to a
//! [`port::RepairStore`] and the event hub.

pub mod compose;
pub mod confirm;
pub mod history;
pub mod ledger;
pub mod lock;
pub mod port;
pub mod service;
pub mod status;
pub mod validation;

use port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Repair {id} not found")]
    NotFound { id: i32 },

    #[error("Repair {id} is locked; unlock it before editing")]
    Locked { id: i32 },

    #[error("Confirmation required: {0}")]
    Confirmation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::lifecycle::ledger::Money;
    use crate::models::repairs::{self, PartsUsed, RepairStatus};

    pub fn repair() -> repairs::Model {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap();
        repairs::Model {
            id: 1,
            customer_name: "Dana".to_string(),
            contact: "+1 555 0100".to_string(),
            item_brand: "Makita".to_string(),
            item_model: Some("DHP482".to_string()),
            serial_number: Some("SN123".to_string()),
            under_warranty: false,
            problem_description: "Chuck slips under load".to_string(),
            status: RepairStatus::InProgress,
            repair_cost: Money::ZERO,
            amount_paid: Money::ZERO,
            parts_used: PartsUsed::default(),
            is_unlocked: true,
            created_at: at,
            updated_at: at,
        }
    }
}
