//! Persistence port consumed by the lifecycle core.

use async_trait::async_trait;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};

use crate::lifecycle::ledger::Money;
use crate::models::repairs::{self, CreateRepair, RepairListQuery, RepairStatus, UpdateRepairDetails};
use crate::models::whatsapp_templates;

/// A single field-level update. Each variant is written in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RepairChange {
    Details(UpdateRepairDetails),
    Status {
        status: RepairStatus,
        is_unlocked: bool,
    },
    Costs {
        repair_cost: Money,
        amount_paid: Money,
    },
    Warranty {
        under_warranty: bool,
    },
    Parts {
        parts_used: Vec<String>,
    },
    Unlock,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RepairStore: Send + Sync {
    /// Store a new repair in `pending-diagnosis`, unlocked.
    async fn insert_repair(&self, input: CreateRepair) -> Result<repairs::Model, StoreError>;

    /// One page of repairs, newest first.
    async fn list_repairs(
        &self,
        query: &RepairListQuery,
    ) -> Result<Vec<repairs::Model>, StoreError>;

    async fn get_repair_by_id(&self, id: i32) -> Result<Option<repairs::Model>, StoreError>;

    /// Returns `false` when no row with `id` exists.
    async fn update_repair(&self, id: i32, change: RepairChange) -> Result<bool, StoreError>;

    /// Returns `false` when no row with `id` exists.
    async fn delete_repair(&self, id: i32) -> Result<bool, StoreError>;

    async fn get_repairs_by_serial_number(
        &self,
        serial_number: &str,
    ) -> Result<Vec<repairs::Model>, StoreError>;

    async fn get_whatsapp_template_by_status(
        &self,
        status_label: &str,
    ) -> Result<Option<whatsapp_templates::Model>, StoreError>;
}
