//! Health check endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::{AdminStore, CustomerStore};
use crate::error::{ErrorResponse, ErrorType, error_obj};

/// Health check response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness check response.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    store: &'static str,
}

/// Health check endpoint.
///
/// Returns 200 if the service is running.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check endpoint.
///
/// Returns 200 once both credential stores answer.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Credential store unavailable", body = ErrorResponse)
    )
)]
#[get("/ready")]
pub async fn ready(
    admins: web::Data<AdminStore>,
    customers: web::Data<CustomerStore>,
) -> HttpResponse {
    let probe = match admins.ping().await {
        Ok(()) => customers.ping().await,
        Err(e) => Err(e),
    };

    match probe {
        Ok(()) => HttpResponse::Ok().json(ReadyResponse {
            status: "ready",
            store: "connected",
        }),
        Err(e) => {
            tracing::warn!("Readiness probe failed: {}", e);
            let status = StatusCode::SERVICE_UNAVAILABLE;
            HttpResponse::build(status).json(ErrorResponse {
                success: false,
                error: error_obj(status, ErrorType::Internal, "credential store unavailable", None),
            })
        }
    }
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
