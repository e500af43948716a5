use actix_web::web;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::cache::TemplateCache;
use crate::config::AppConfig;
use crate::db::store::SeaOrmStore;
use crate::events::hub::EventHub;
use crate::lifecycle::confirm::ConfirmationRegistry;
use crate::lifecycle::service::RepairService;

/// Everything the handlers pull out of actix app data.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub service: Arc<RepairService>,
    pub confirmations: Arc<ConfirmationRegistry>,
    pub templates: TemplateCache,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let templates = TemplateCache::new(config.template_cache_ttl);
        let store = SeaOrmStore::new(db.clone(), templates.clone());
        let service = RepairService::new(Arc::new(store), Arc::new(EventHub::new()));

        Self {
            db,
            service: Arc::new(service),
            confirmations: Arc::new(ConfirmationRegistry::new(config.confirmation_ttl)),
            templates,
        }
    }

    /// Register the shared state as app data.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.db.clone()))
            .app_data(web::Data::new(self.service.clone()))
            .app_data(web::Data::new(self.confirmations.clone()))
            .app_data(web::Data::new(self.templates.clone()));
    }
}
