use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::lifecycle::confirm::{ConfirmOutcome, ConfirmationRegistry, GuardedAction};
use crate::lifecycle::service::RepairService;

/// Request body for the confirm endpoints.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ConfirmRequest {
    pub ticket: Uuid,
}

async fn start(
    service: &RepairService,
    registry: &ConfirmationRegistry,
    id: i32,
    action: GuardedAction,
) -> AppResult<HttpResponse> {
    // 404 before handing out a ticket for a repair that does not exist.
    service.load(id).await?;
    let ticket = registry.request(id, action).await;
    Ok(HttpResponse::Accepted().json(ticket))
}

/// POST /api/repairs/{id}/unlock: start the unlock confirmation.
pub async fn request_unlock(
    service: web::Data<Arc<RepairService>>,
    registry: web::Data<Arc<ConfirmationRegistry>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    start(&service, &registry, path.into_inner(), GuardedAction::Unlock).await
}

/// POST /api/repairs/{id}/unlock/confirm: `{ "ticket": "<uuid>" }`.
pub async fn confirm_unlock(
    service: web::Data<Arc<RepairService>>,
    registry: web::Data<Arc<ConfirmationRegistry>>,
    path: web::Path<i32>,
    body: web::Json<ConfirmRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match registry.confirm(body.ticket, id, GuardedAction::Unlock).await? {
        ConfirmOutcome::Pending(ticket) => Ok(HttpResponse::Accepted().json(ticket)),
        ConfirmOutcome::Confirmed(proof) => {
            let view = service.unlock(proof).await?;
            Ok(HttpResponse::Ok().json(view))
        }
    }
}

/// POST /api/repairs/{id}/delete: start the two-step delete confirmation.
pub async fn request_delete(
    service: web::Data<Arc<RepairService>>,
    registry: web::Data<Arc<ConfirmationRegistry>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    start(&service, &registry, path.into_inner(), GuardedAction::Delete).await
}

/// POST /api/repairs/{id}/delete/confirm: call once per confirmation step.
pub async fn confirm_delete(
    service: web::Data<Arc<RepairService>>,
    registry: web::Data<Arc<ConfirmationRegistry>>,
    path: web::Path<i32>,
    body: web::Json<ConfirmRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match registry.confirm(body.ticket, id, GuardedAction::Delete).await? {
        ConfirmOutcome::Pending(ticket) => Ok(HttpResponse::Accepted().json(ticket)),
        ConfirmOutcome::Confirmed(proof) => {
            service.delete(proof).await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Repair {id} deleted"),
            })))
        }
    }
}

/// POST /api/confirmations/{ticket}/cancel: the user backed out of the dialog.
pub async fn cancel(
    registry: web::Data<Arc<ConfirmationRegistry>>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    registry.cancel(path.into_inner()).await;
    HttpResponse::NoContent().finish()
}
