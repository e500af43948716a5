use sea_orm::*;

use crate::models::whatsapp_templates;

/// Fetch all templates in seed order.
pub async fn get_all_templates(
    db: &DatabaseConnection,
) -> Result<Vec<whatsapp_templates::Model>, DbErr> {
    whatsapp_templates::Entity::find()
        .order_by_asc(whatsapp_templates::Column::Id)
        .all(db)
        .await
}

/// Fetch the template for a status label.
pub async fn get_template_by_status(
    db: &DatabaseConnection,
    status_label: &str,
) -> Result<Option<whatsapp_templates::Model>, DbErr> {
    whatsapp_templates::Entity::find()
        .filter(whatsapp_templates::Column::StatusLabel.eq(status_label))
        .one(db)
        .await
}

/// Replace the template for a status label, creating the row if needed.
pub async fn upsert_template(
    db: &DatabaseConnection,
    status_label: &str,
    template: String,
) -> Result<whatsapp_templates::Model, DbErr> {
    let now = chrono::Utc::now();

    match get_template_by_status(db, status_label).await? {
        Some(existing) => {
            let mut active: whatsapp_templates::ActiveModel = existing.into();
            active.template = Set(template);
            active.updated_at = Set(now);
            active.update(db).await
        }
        None => {
            let new_template = whatsapp_templates::ActiveModel {
                id: NotSet,
                status_label: Set(status_label.to_string()),
                template: Set(template),
                updated_at: Set(now),
            };
            new_template.insert(db).await
        }
    }
}
