use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::error::AppResult;
use crate::lifecycle::service::RepairService;
use crate::models::repairs::{
    AddPart, CreateRepair, RepairListQuery, UpdateRepairCosts, UpdateRepairDetails,
    UpdateRepairStatus, UpdateWarranty,
};

/// GET /api/repairs?page=1&limit=50&status=in-progress: newest first.
pub async fn get_repairs(
    service: web::Data<Arc<RepairService>>,
    query: web::Query<RepairListQuery>,
) -> AppResult<HttpResponse> {
    let views = service.list(&query).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// POST /api/repairs: log a new repair in `pending-diagnosis`.
pub async fn create_repair(
    service: web::Data<Arc<RepairService>>,
    body: web::Json<CreateRepair>,
) -> AppResult<HttpResponse> {
    let view = service.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(view))
}

/// GET /api/repairs/{id}
pub async fn get_repair(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let view = service.view(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/repairs/{id}/details: customer, item and problem fields.
pub async fn update_details(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateRepairDetails>,
) -> AppResult<HttpResponse> {
    let view = service
        .update_details(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/repairs/{id}/status: moving to `picked-up` locks the repair.
pub async fn update_status(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateRepairStatus>,
) -> AppResult<HttpResponse> {
    let view = service
        .change_status(path.into_inner(), body.status)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/repairs/{id}/costs
pub async fn update_costs(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateRepairCosts>,
) -> AppResult<HttpResponse> {
    let view = service
        .update_costs(path.into_inner(), body.repair_cost, body.amount_paid)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/repairs/{id}/warranty
pub async fn update_warranty(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
    body: web::Json<UpdateWarranty>,
) -> AppResult<HttpResponse> {
    let view = service
        .set_warranty(path.into_inner(), body.under_warranty)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/repairs/{id}/parts: append one part.
pub async fn add_part(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
    body: web::Json<AddPart>,
) -> AppResult<HttpResponse> {
    let view = service.add_part(path.into_inner(), &body.part).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// DELETE /api/repairs/{id}/parts/{index}: remove the part at a position.
pub async fn remove_part(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<(i32, usize)>,
) -> AppResult<HttpResponse> {
    let (id, index) = path.into_inner();
    let view = service.remove_part(id, index).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/repairs/{id}/history: other repairs with the same serial number.
pub async fn get_history(
    service: web::Data<Arc<RepairService>>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let history = service.history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}
