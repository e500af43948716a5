use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `whatsapp_templates` table.
///
/// One row per human-readable status label (see [`RepairStatus::label`]).
///
/// [`RepairStatus::label`]: crate::models::repairs::RepairStatus::label
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "whatsapp_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub status_label: String,
    #[sea_orm(column_type = "Text")]
    pub template: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 2000, message = "template must be 1-2000 characters"))]
    pub template: String,
}
