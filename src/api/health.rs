use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::Store;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn Store>) -> impl Responder {
    let (status, database) = match store.ping().await {
        Ok(()) => ("healthy", "up"),
        Err(e) => {
            log::error!("❌ Health check: database ping failed: {}", e);
            ("unhealthy", "down")
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database == "up" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
