use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `repairs` table and its columns.
#[derive(DeriveIden)]
enum Repairs {
    Table,
    Id,
    CustomerName,
    Contact,
    ItemBrand,
    ItemModel,
    SerialNumber,
    UnderWarranty,
    ProblemDescription,
    Status,
    RepairCost,
    AmountPaid,
    PartsUsed,
    IsUnlocked,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Money columns hold integer cents.
        manager
            .create_table(
                Table::create()
                    .table(Repairs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repairs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repairs::CustomerName).string().not_null())
                    .col(ColumnDef::new(Repairs::Contact).string().not_null())
                    .col(ColumnDef::new(Repairs::ItemBrand).string().not_null())
                    .col(ColumnDef::new(Repairs::ItemModel).string())
                    .col(ColumnDef::new(Repairs::SerialNumber).string())
                    .col(
                        ColumnDef::new(Repairs::UnderWarranty)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Repairs::ProblemDescription).text().not_null())
                    .col(
                        ColumnDef::new(Repairs::Status)
                            .string()
                            .not_null()
                            .default("pending-diagnosis"),
                    )
                    .col(
                        ColumnDef::new(Repairs::RepairCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Repairs::AmountPaid)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Repairs::PartsUsed)
                            .json()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Repairs::IsUnlocked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Repairs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Repairs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repairs::Table).to_owned())
            .await
    }
}
