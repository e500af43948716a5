use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use validator::Validate;

use crate::cache::TemplateCache;
use crate::db::whatsapp_templates as template_db;
use crate::error::{AppError, AppResult};
use crate::lifecycle::service::RepairService;
use crate::models::repairs::RepairStatus;
use crate::models::whatsapp_templates::UpdateTemplate;

/// GET /api/repairs/{id}/message: status update for review before sending.
pub async fn get_status_message(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let preview = service.status_message(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(preview))
}

/// GET /api/repairs/{id}/history-message: every repair for this serial number.
pub async fn get_history_message(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let preview = service.history_message(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(preview))
}

/// GET /api/whatsapp-templates
pub async fn get_templates(db: web::Data<DatabaseConnection>) -> AppResult<HttpResponse> {
    let templates = template_db::get_all_templates(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(templates))
}

/// PUT /api/whatsapp-templates/{status}: accepts `picked-up` or `Picked Up`.
pub async fn update_template(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<TemplateCache>,
    path: web::Path<String>,
    body: web::Json<UpdateTemplate>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let status = RepairStatus::parse(&raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{raw}'")))?;
    body.validate()?;

    let label = status.label();
    let saved = template_db::upsert_template(db.get_ref(), label, body.into_inner().template).await?;
    cache.invalidate(label).await;
    tracing::info!(status = label, "whatsapp template updated");

    Ok(HttpResponse::Ok().json(saved))
}
