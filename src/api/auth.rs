//! Customer self-service endpoints.

use actix_web::{HttpResponse, get, post, put, web};
use secrecy::SecretString;

use super::JsonBody;
use crate::auth::{self, CustomerAuth, SubjectKind, TokenService, password};
use crate::db::CustomerStore;
use crate::error::AppResult;
use crate::models::{
    ChangePasswordRequest, CustomerChanges, CustomerResponse, CustomerUpdatedResponse,
    DataResponse, LoginRequest, MessageResponse, NewCustomer, RegisterCustomerRequest,
    TokenResponse, UpdateCustomerSelfRequest,
};
use crate::validation::{check_required_fields, ensure_email};

/// Configure customer auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(me)
        .service(update_details)
        .service(change_password);
}

/// Register a customer account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Customer Auth",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = TokenResponse),
        (status = 400, description = "Missing fields, bad email, or email already exists", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/register")]
pub async fn register(
    body: JsonBody<RegisterCustomerRequest>,
    store: web::Data<CustomerStore>,
    tokens: web::Data<TokenService>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    check_required_fields(&[
        ("fullname", req.fullname.as_deref()),
        ("email", req.email.as_deref()),
        ("password", req.password.as_deref()),
        ("shippingAddress", req.shipping_address.as_deref()),
    ])?;

    let email = req.email.unwrap_or_default();
    ensure_email(&email)?;

    let password_hash = password::hash(SecretString::from(req.password.unwrap_or_default())).await?;

    let customer = store
        .create(NewCustomer {
            fullname: req.fullname.unwrap_or_default(),
            email,
            password_hash,
            shipping_address: req.shipping_address.unwrap_or_default(),
            phone: req.phone.filter(|p| !p.is_empty()),
        })
        .await?;

    tracing::info!(customer_id = customer.id, "Customer registered");

    let token = tokens.issue(SubjectKind::Customer, customer.id, None)?;
    Ok(HttpResponse::Created().json(TokenResponse::new(token)))
}

/// Customer login.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Customer Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Email or password is incorrect", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    body: JsonBody<LoginRequest>,
    store: web::Data<CustomerStore>,
    tokens: web::Data<TokenService>,
) -> AppResult<HttpResponse> {
    let token = auth::login(store.get_ref(), &tokens, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token)))
}

/// The signed-in customer.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Customer Auth",
    responses(
        (status = 200, description = "Current customer", body = CustomerResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/auth/me")]
pub async fn me(caller: CustomerAuth) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(DataResponse::new(CustomerResponse::from(caller.into_inner()))))
}

/// Update the signed-in customer's details.
///
/// Only the supplied, non-empty fields change; the response echoes them with
/// the new `updatedAt`.
#[utoipa::path(
    put,
    path = "/api/v1/auth/update-details",
    tag = "Customer Auth",
    request_body = UpdateCustomerSelfRequest,
    responses(
        (status = 200, description = "Details updated", body = CustomerUpdatedResponse),
        (status = 400, description = "Bad email or email already exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[put("/auth/update-details")]
pub async fn update_details(
    caller: CustomerAuth,
    body: JsonBody<UpdateCustomerSelfRequest>,
    store: web::Data<CustomerStore>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = CustomerChanges {
        fullname: non_empty(req.fullname),
        email: non_empty(req.email),
        password_hash: None,
        shipping_address: non_empty(req.shipping_address),
        phone: non_empty(req.phone),
    };

    if let Some(email) = changes.email.as_deref() {
        ensure_email(email)?;
    }

    let echo = CustomerUpdatedResponse {
        fullname: changes.fullname.clone(),
        email: changes.email.clone(),
        shipping_address: changes.shipping_address.clone(),
        phone: changes.phone.clone(),
        updated_at: None,
    };

    let updated = store.update(caller.id, changes).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(CustomerUpdatedResponse {
        updated_at: updated.updated_at,
        ..echo
    })))
}

/// Change the signed-in customer's password.
#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Customer Auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required or current password is incorrect", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[put("/auth/change-password")]
pub async fn change_password(
    caller: CustomerAuth,
    body: JsonBody<ChangePasswordRequest>,
    store: web::Data<CustomerStore>,
) -> AppResult<HttpResponse> {
    auth::change_password(store.get_ref(), &caller.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("password has been updated")))
}

/// Treat an empty string the same as an absent field.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
