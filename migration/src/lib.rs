pub use sea_orm_migration::prelude::*;

mod m20261002_000001_create_repairs_table;
mod m20261002_000002_create_whatsapp_templates_table;
mod m20261002_000003_add_repair_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261002_000001_create_repairs_table::Migration),
            Box::new(m20261002_000002_create_whatsapp_templates_table::Migration),
            Box::new(m20261002_000003_add_repair_indexes::Migration),
        ]
    }
}
