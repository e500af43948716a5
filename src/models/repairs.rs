use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::lifecycle::ledger::Money;

/// Repair status stored as a kebab-case string in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    #[sea_orm(string_value = "pending-diagnosis")]
    PendingDiagnosis,
    #[sea_orm(string_value = "awaiting-parts")]
    AwaitingParts,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "awaiting-pickup")]
    AwaitingPickup,
    #[sea_orm(string_value = "picked-up")]
    PickedUp,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl RepairStatus {
    pub const ALL: [RepairStatus; 7] = [
        RepairStatus::PendingDiagnosis,
        RepairStatus::AwaitingParts,
        RepairStatus::InProgress,
        RepairStatus::Completed,
        RepairStatus::AwaitingPickup,
        RepairStatus::PickedUp,
        RepairStatus::Cancelled,
    ];

    /// Human-readable label, also the key for WhatsApp template lookup.
    pub fn label(self) -> &'static str {
        match self {
            RepairStatus::PendingDiagnosis => "Pending Diagnosis",
            RepairStatus::AwaitingParts => "Awaiting Parts",
            RepairStatus::InProgress => "In Progress",
            RepairStatus::Completed => "Completed",
            RepairStatus::AwaitingPickup => "Awaiting Pickup",
            RepairStatus::PickedUp => "Picked Up",
            RepairStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse either the stored value (`picked-up`) or the label (`Picked Up`).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|status| {
            status.label().eq_ignore_ascii_case(raw)
                || status.to_value().eq_ignore_ascii_case(raw)
        })
    }
}

/// Ordered list of parts fitted during a repair, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PartsUsed(pub Vec<String>);

/// SeaORM entity for the `repairs` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repairs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_name: String,
    pub contact: String,
    pub item_brand: String,
    pub item_model: Option<String>,
    pub serial_number: Option<String>,
    pub under_warranty: bool,
    #[sea_orm(column_type = "Text")]
    pub problem_description: String,
    pub status: RepairStatus,
    pub repair_cost: Money,
    pub amount_paid: Money,
    pub parts_used: PartsUsed,
    pub is_unlocked: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for logging a new repair.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRepair {
    #[validate(length(min = 1, max = 40, message = "customer name must be 1-40 characters"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50, message = "contact must be 1-50 characters"))]
    pub contact: String,
    #[validate(length(min = 1, max = 50, message = "item brand must be 1-50 characters"))]
    pub item_brand: String,
    #[validate(length(max = 50, message = "item model must be at most 50 characters"))]
    pub item_model: Option<String>,
    #[validate(length(max = 30, message = "serial number must be at most 30 characters"))]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub under_warranty: bool,
    #[validate(length(
        min = 1,
        max = 500,
        message = "problem description must be 1-500 characters"
    ))]
    pub problem_description: String,
    #[serde(default)]
    pub repair_cost: Money,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub parts_used: Vec<String>,
}

/// Request body for editing customer, item and problem fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct UpdateRepairDetails {
    #[validate(length(min = 1, max = 40, message = "customer name must be 1-40 characters"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50, message = "contact must be 1-50 characters"))]
    pub contact: String,
    #[validate(length(min = 1, max = 50, message = "item brand must be 1-50 characters"))]
    pub item_brand: String,
    #[validate(length(max = 50, message = "item model must be at most 50 characters"))]
    pub item_model: Option<String>,
    #[validate(length(max = 30, message = "serial number must be at most 30 characters"))]
    pub serial_number: Option<String>,
    #[validate(length(
        min = 1,
        max = 500,
        message = "problem description must be 1-500 characters"
    ))]
    pub problem_description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRepairStatus {
    pub status: RepairStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRepairCosts {
    pub repair_cost: Money,
    pub amount_paid: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWarranty {
    pub under_warranty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPart {
    pub part: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepairListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<RepairStatus>,
}

impl RepairListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }
}
