use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::cache::TemplateCache;
use crate::db::{repairs as repair_db, whatsapp_templates as template_db};
use crate::lifecycle::port::{RepairChange, RepairStore, StoreError};
use crate::models::repairs::{self, CreateRepair, RepairListQuery};
use crate::models::whatsapp_templates;

/// [`RepairStore`] backed by the SQLite database.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    templates: TemplateCache,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection, templates: TemplateCache) -> Self {
        Self { db, templates }
    }
}

#[async_trait]
impl RepairStore for SeaOrmStore {
    async fn insert_repair(&self, input: CreateRepair) -> Result<repairs::Model, StoreError> {
        Ok(repair_db::insert_repair(&self.db, input).await?)
    }

    async fn list_repairs(
        &self,
        query: &RepairListQuery,
    ) -> Result<Vec<repairs::Model>, StoreError> {
        Ok(repair_db::get_repairs(&self.db, query).await?)
    }

    async fn get_repair_by_id(&self, id: i32) -> Result<Option<repairs::Model>, StoreError> {
        Ok(repair_db::get_repair_by_id(&self.db, id).await?)
    }

    async fn update_repair(&self, id: i32, change: RepairChange) -> Result<bool, StoreError> {
        Ok(repair_db::apply_change(&self.db, id, change).await?.is_some())
    }

    async fn delete_repair(&self, id: i32) -> Result<bool, StoreError> {
        let result = repair_db::delete_repair(&self.db, id).await?;
        Ok(result.rows_affected > 0)
    }

    async fn get_repairs_by_serial_number(
        &self,
        serial_number: &str,
    ) -> Result<Vec<repairs::Model>, StoreError> {
        Ok(repair_db::get_repairs_by_serial_number(&self.db, serial_number).await?)
    }

    async fn get_whatsapp_template_by_status(
        &self,
        status_label: &str,
    ) -> Result<Option<whatsapp_templates::Model>, StoreError> {
        if let Some(cached) = self.templates.get(status_label).await {
            return Ok(cached);
        }

        let row = template_db::get_template_by_status(&self.db, status_label).await?;
        self.templates.set(status_label, row.clone()).await;
        Ok(row)
    }
}
