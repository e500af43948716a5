use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `whatsapp_templates` table and its columns.
#[derive(DeriveIden)]
enum WhatsappTemplates {
    Table,
    Id,
    StatusLabel,
    Template,
    UpdatedAt,
}

/// One starter template per status label.
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    (
        "Pending Diagnosis",
        "Hello {customerName}, we have received your {itemBrand} {itemModel} (S/N: {serialNumber}). Repair #{repairId} is waiting for diagnosis.",
    ),
    (
        "Awaiting Parts",
        "Hello {customerName}, repair #{repairId} for your {itemBrand} {itemModel} is waiting for parts. We will update you as soon as they arrive.",
    ),
    (
        "In Progress",
        "Hello {customerName}, work on your {itemBrand} {itemModel} (repair #{repairId}) is now in progress.",
    ),
    (
        "Completed",
        "Hello {customerName}, repair #{repairId} for your {itemBrand} {itemModel} is complete. Total: ${repairCost}, paid: ${amountPaid}.",
    ),
    (
        "Awaiting Pickup",
        "Hello {customerName}, your {itemBrand} {itemModel} is ready for pickup. Amount due: ${amountLeft}.",
    ),
    (
        "Picked Up",
        "Thank you {customerName}! Your {itemBrand} {itemModel} (repair #{repairId}) has been picked up.",
    ),
    (
        "Cancelled",
        "Hello {customerName}, repair #{repairId} for your {itemBrand} {itemModel} has been cancelled.",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WhatsappTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WhatsappTemplates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WhatsappTemplates::StatusLabel)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WhatsappTemplates::Template).text().not_null())
                    .col(
                        ColumnDef::new(WhatsappTemplates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(WhatsappTemplates::Table).columns([
            WhatsappTemplates::StatusLabel,
            WhatsappTemplates::Template,
            WhatsappTemplates::UpdatedAt,
        ]);
        for (label, template) in DEFAULT_TEMPLATES {
            seed.values_panic([
                (*label).into(),
                (*template).into(),
                Expr::current_timestamp().into(),
            ]);
        }

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WhatsappTemplates::Table).to_owned())
            .await
    }
}
