use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Repairs {
    Table,
    SerialNumber,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // History lookups go through serial_number
        manager
            .create_index(
                Index::create()
                    .name("idx_repairs_serial_number")
                    .table(Repairs::Table)
                    .col(Repairs::SerialNumber)
                    .to_owned(),
            )
            .await?;

        // Filtered list view
        manager
            .create_index(
                Index::create()
                    .name("idx_repairs_status_created")
                    .table(Repairs::Table)
                    .col(Repairs::Status)
                    .col(Repairs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_repairs_serial_number")
                    .table(Repairs::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_repairs_status_created")
                    .table(Repairs::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
