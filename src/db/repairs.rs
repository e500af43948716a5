use sea_orm::*;

use crate::lifecycle::port::RepairChange;
use crate::models::repairs::{self, CreateRepair, PartsUsed, RepairListQuery, RepairStatus};

/// Insert a new repair (always starts in PendingDiagnosis, unlocked).
pub async fn insert_repair(
    db: &DatabaseConnection,
    input: CreateRepair,
) -> Result<repairs::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_repair = repairs::ActiveModel {
        id: NotSet,
        customer_name: Set(input.customer_name),
        contact: Set(input.contact),
        item_brand: Set(input.item_brand),
        item_model: Set(input.item_model),
        serial_number: Set(input.serial_number),
        under_warranty: Set(input.under_warranty),
        problem_description: Set(input.problem_description),
        status: Set(RepairStatus::PendingDiagnosis),
        repair_cost: Set(input.repair_cost),
        amount_paid: Set(input.amount_paid),
        parts_used: Set(PartsUsed(input.parts_used)),
        is_unlocked: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_repair.insert(db).await
}

/// Fetch a page of repairs, newest first, optionally filtered by status.
pub async fn get_repairs(
    db: &DatabaseConnection,
    query: &RepairListQuery,
) -> Result<Vec<repairs::Model>, DbErr> {
    let mut select = repairs::Entity::find();
    if let Some(status) = query.status {
        select = select.filter(repairs::Column::Status.eq(status));
    }

    select
        .order_by_desc(repairs::Column::CreatedAt)
        .order_by_desc(repairs::Column::Id)
        .offset((query.page() - 1) * query.limit())
        .limit(query.limit())
        .all(db)
        .await
}

/// Fetch a single repair by ID.
pub async fn get_repair_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<repairs::Model>, DbErr> {
    repairs::Entity::find_by_id(id).one(db).await
}

/// Fetch every repair recorded against a serial number, newest first.
pub async fn get_repairs_by_serial_number(
    db: &DatabaseConnection,
    serial_number: &str,
) -> Result<Vec<repairs::Model>, DbErr> {
    repairs::Entity::find()
        .filter(repairs::Column::SerialNumber.eq(serial_number))
        .order_by_desc(repairs::Column::CreatedAt)
        .order_by_desc(repairs::Column::Id)
        .all(db)
        .await
}

/// Apply one field-level change. Returns `None` if the repair does not exist.
pub async fn apply_change(
    db: &DatabaseConnection,
    id: i32,
    change: RepairChange,
) -> Result<Option<repairs::Model>, DbErr> {
    let Some(repair) = repairs::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: repairs::ActiveModel = repair.into();

    match change {
        RepairChange::Details(details) => {
            active.customer_name = Set(details.customer_name);
            active.contact = Set(details.contact);
            active.item_brand = Set(details.item_brand);
            active.item_model = Set(details.item_model);
            active.serial_number = Set(details.serial_number);
            active.problem_description = Set(details.problem_description);
        }
        RepairChange::Status {
            status,
            is_unlocked,
        } => {
            active.status = Set(status);
            active.is_unlocked = Set(is_unlocked);
        }
        RepairChange::Costs {
            repair_cost,
            amount_paid,
        } => {
            active.repair_cost = Set(repair_cost);
            active.amount_paid = Set(amount_paid);
        }
        RepairChange::Warranty { under_warranty } => {
            active.under_warranty = Set(under_warranty);
        }
        RepairChange::Parts { parts_used } => {
            active.parts_used = Set(PartsUsed(parts_used));
        }
        RepairChange::Unlock => {
            active.is_unlocked = Set(true);
        }
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await.map(Some)
}

/// Delete a repair by ID.
pub async fn delete_repair(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    repairs::Entity::delete_by_id(id).exec(db).await
}
