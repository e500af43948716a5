use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

/// GET /api/health: reports whether the database answers.
pub async fn health(db: web::Data<DatabaseConnection>) -> HttpResponse {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unavailable",
            }))
        }
    }
}
