pub mod repairs;
pub mod store;
pub mod whatsapp_templates;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

/// Open the SQLite database and bring its schema up to date.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
