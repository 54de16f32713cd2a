//! Customer management endpoints for back-office admins.

use actix_web::{HttpResponse, delete, get, web};

use crate::auth::{AdminAuth, authorize};
use crate::db::CustomerStore;
use crate::error::{AppError, AppResult};
use crate::models::{AdminRole, CustomerResponse, DataResponse, ListResponse};

const CUSTOMER_MANAGERS: &[AdminRole] = &[AdminRole::Superadmin, AdminRole::Admin];

/// Configure customer management routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_customers)
        .service(get_customer)
        .service(delete_customer);
}

/// List every customer.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "All customers", body = [CustomerResponse]),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN or ADMIN role required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/customers")]
pub async fn list_customers(
    caller: AdminAuth,
    store: web::Data<CustomerStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, CUSTOMER_MANAGERS)?;

    let customers = store.list().await?;
    let items: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();

    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// Get one customer.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer details", body = CustomerResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN or ADMIN role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/customers/{id}")]
pub async fn get_customer(
    caller: AdminAuth,
    path: web::Path<i32>,
    store: web::Data<CustomerStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, CUSTOMER_MANAGERS)?;

    let customer = store
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("customer".to_string()))?;

    Ok(HttpResponse::Ok().json(DataResponse::new(CustomerResponse::from(customer))))
}

/// Delete a customer.
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN or ADMIN role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[delete("/customers/{id}")]
pub async fn delete_customer(
    caller: AdminAuth,
    path: web::Path<i32>,
    store: web::Data<CustomerStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, CUSTOMER_MANAGERS)?;

    let id = path.into_inner();
    store.delete(id).await?;
    tracing::info!(customer_id = id, deleted_by = caller.id, "Customer deleted");

    Ok(HttpResponse::NoContent().finish())
}
