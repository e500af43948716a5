//! Shared fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use migration::{Migrator, MigratorTrait};
use repair_desk::events::hub::EventHub;
use repair_desk::lifecycle::ledger::Money;
use repair_desk::lifecycle::port::{RepairChange, RepairStore, StoreError};
use repair_desk::lifecycle::service::RepairService;
use repair_desk::models::repairs::{self, CreateRepair, PartsUsed, RepairListQuery, RepairStatus};
use repair_desk::models::whatsapp_templates;

/// In-memory [`RepairStore`] with switchable failure modes.
#[derive(Default)]
pub struct MemoryStore {
    repairs: Mutex<BTreeMap<i32, repairs::Model>>,
    templates: Mutex<HashMap<String, String>>,
    /// Every store call fails while set.
    pub offline: AtomicBool,
    /// Only serial-number lookups fail while set.
    pub history_offline: AtomicBool,
    pub serial_lookups: AtomicUsize,
    pub updates: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, repair: repairs::Model) {
        self.repairs.lock().await.insert(repair.id, repair);
    }

    pub async fn get(&self, id: i32) -> Option<repairs::Model> {
        self.repairs.lock().await.get(&id).cloned()
    }

    pub async fn set_template(&self, label: &str, template: &str) {
        self.templates
            .lock()
            .await
            .insert(label.to_string(), template.to_string());
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RepairStore for MemoryStore {
    async fn insert_repair(&self, input: CreateRepair) -> Result<repairs::Model, StoreError> {
        self.check_online()?;
        let mut repairs = self.repairs.lock().await;
        let id = repairs.keys().next_back().map_or(1, |last| last + 1);
        let now = Utc::now();

        let repair = repairs::Model {
            id,
            customer_name: input.customer_name,
            contact: input.contact,
            item_brand: input.item_brand,
            item_model: input.item_model,
            serial_number: input.serial_number,
            under_warranty: input.under_warranty,
            problem_description: input.problem_description,
            status: RepairStatus::PendingDiagnosis,
            repair_cost: input.repair_cost,
            amount_paid: input.amount_paid,
            parts_used: PartsUsed(input.parts_used),
            is_unlocked: true,
            created_at: now,
            updated_at: now,
        };
        repairs.insert(id, repair.clone());
        Ok(repair)
    }

    async fn list_repairs(
        &self,
        query: &RepairListQuery,
    ) -> Result<Vec<repairs::Model>, StoreError> {
        self.check_online()?;
        let mut rows: Vec<repairs::Model> = self
            .repairs
            .lock()
            .await
            .values()
            .filter(|r| query.status.is_none_or(|status| r.status == status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let skip = ((query.page() - 1) * query.limit()) as usize;
        Ok(rows
            .into_iter()
            .skip(skip)
            .take(query.limit() as usize)
            .collect())
    }

    async fn get_repair_by_id(&self, id: i32) -> Result<Option<repairs::Model>, StoreError> {
        self.check_online()?;
        Ok(self.get(id).await)
    }

    async fn update_repair(&self, id: i32, change: RepairChange) -> Result<bool, StoreError> {
        self.check_online()?;
        self.updates.fetch_add(1, Ordering::SeqCst);

        let mut repairs = self.repairs.lock().await;
        let Some(repair) = repairs.get_mut(&id) else {
            return Ok(false);
        };

        match change {
            RepairChange::Details(d) => {
                repair.customer_name = d.customer_name;
                repair.contact = d.contact;
                repair.item_brand = d.item_brand;
                repair.item_model = d.item_model;
                repair.serial_number = d.serial_number;
                repair.problem_description = d.problem_description;
            }
            RepairChange::Status {
                status,
                is_unlocked,
            } => {
                repair.status = status;
                repair.is_unlocked = is_unlocked;
            }
            RepairChange::Costs {
                repair_cost,
                amount_paid,
            } => {
                repair.repair_cost = repair_cost;
                repair.amount_paid = amount_paid;
            }
            RepairChange::Warranty { under_warranty } => repair.under_warranty = under_warranty,
            RepairChange::Parts { parts_used } => repair.parts_used = PartsUsed(parts_used),
            RepairChange::Unlock => repair.is_unlocked = true,
        }
        repair.updated_at = repair.updated_at + Duration::seconds(1);
        Ok(true)
    }

    async fn delete_repair(&self, id: i32) -> Result<bool, StoreError> {
        self.check_online()?;
        Ok(self.repairs.lock().await.remove(&id).is_some())
    }

    async fn get_repairs_by_serial_number(
        &self,
        serial_number: &str,
    ) -> Result<Vec<repairs::Model>, StoreError> {
        self.check_online()?;
        self.serial_lookups.fetch_add(1, Ordering::SeqCst);
        if self.history_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("history is offline".to_string()));
        }

        Ok(self
            .repairs
            .lock()
            .await
            .values()
            .filter(|r| r.serial_number.as_deref() == Some(serial_number))
            .cloned()
            .collect())
    }

    async fn get_whatsapp_template_by_status(
        &self,
        status_label: &str,
    ) -> Result<Option<whatsapp_templates::Model>, StoreError> {
        self.check_online()?;
        Ok(self
            .templates
            .lock()
            .await
            .get(status_label)
            .map(|template| whatsapp_templates::Model {
                id: 1,
                status_label: status_label.to_string(),
                template: template.clone(),
                updated_at: Utc::now(),
            }))
    }
}

/// A repair in progress with no money recorded.
pub fn sample_repair(id: i32) -> repairs::Model {
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
    repairs::Model {
        id,
        customer_name: "Priya Nair".to_string(),
        contact: "+44 7700 900123".to_string(),
        item_brand: "Bosch".to_string(),
        item_model: Some("GSR 18V".to_string()),
        serial_number: Some("SN123".to_string()),
        under_warranty: false,
        problem_description: "Battery contacts corroded".to_string(),
        status: RepairStatus::InProgress,
        repair_cost: Money::ZERO,
        amount_paid: Money::ZERO,
        parts_used: PartsUsed::default(),
        is_unlocked: true,
        created_at: at,
        updated_at: at,
    }
}

pub fn service_over(store: Arc<MemoryStore>) -> RepairService {
    RepairService::new(store, Arc::new(EventHub::new()))
}

/// Fresh in-memory SQLite database with migrations applied.
pub async fn sqlite_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Each pooled connection would otherwise get its own empty database.
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory SQLite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}
