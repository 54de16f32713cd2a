//! Admin account endpoints.
//!
//! Login and the `/admins/me`-style routes act on the caller; everything else
//! is restricted to SUPERADMIN.

use actix_web::{HttpResponse, delete, get, post, put, web};
use secrecy::SecretString;

use super::JsonBody;
use super::auth::non_empty;
use crate::auth::{self, AdminAuth, TokenService, authorize, password};
use crate::db::AdminStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminChanges, AdminResponse, AdminRole, AdminUpdatedResponse, ChangePasswordRequest,
    CreateAdminRequest, DataResponse, ListResponse, LoginRequest, MessageResponse, NewAdmin,
    TokenResponse, UpdateAdminRequest, UpdateAdminSelfRequest,
};
use crate::validation::{check_required_fields, ensure_email, parse_role};

const SUPERADMIN_ONLY: &[AdminRole] = &[AdminRole::Superadmin];

/// Configure admin routes.
///
/// Literal segments are registered before `/admins/{id}` so they win.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(me)
        .service(change_password)
        .service(update_self)
        .service(list_admins)
        .service(create_admin)
        .service(get_admin)
        .service(update_admin)
        .service(delete_admin);
}

/// Admin login.
#[utoipa::path(
    post,
    path = "/api/v1/admins/login",
    tag = "Admins",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Email or password is incorrect", body = crate::error::ErrorResponse)
    )
)]
#[post("/admins/login")]
pub async fn login(
    body: JsonBody<LoginRequest>,
    store: web::Data<AdminStore>,
    tokens: web::Data<TokenService>,
) -> AppResult<HttpResponse> {
    let token = auth::login(store.get_ref(), &tokens, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token)))
}

/// The signed-in admin.
#[utoipa::path(
    get,
    path = "/api/v1/admins/me",
    tag = "Admins",
    responses(
        (status = 200, description = "Current admin", body = AdminResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/admins/me")]
pub async fn me(caller: AdminAuth) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(DataResponse::new(AdminResponse::from(caller.into_inner()))))
}

/// Change the signed-in admin's password.
#[utoipa::path(
    put,
    path = "/api/v1/admins/change-password",
    tag = "Admins",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required or current password is incorrect", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[put("/admins/change-password")]
pub async fn change_password(
    caller: AdminAuth,
    body: JsonBody<ChangePasswordRequest>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    auth::change_password(store.get_ref(), &caller.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("password has been updated")))
}

/// Update the signed-in admin's username or email.
#[utoipa::path(
    put,
    path = "/api/v1/admins",
    tag = "Admins",
    request_body = UpdateAdminSelfRequest,
    responses(
        (status = 200, description = "Details updated", body = AdminUpdatedResponse),
        (status = 400, description = "Bad email or email already exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[put("/admins")]
pub async fn update_self(
    caller: AdminAuth,
    body: JsonBody<UpdateAdminSelfRequest>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = AdminChanges {
        username: non_empty(req.username),
        email: non_empty(req.email),
        ..Default::default()
    };

    apply_update(store.get_ref(), caller.id, changes).await
}

/// List every admin.
#[utoipa::path(
    get,
    path = "/api/v1/admins",
    tag = "Admins",
    responses(
        (status = 200, description = "All admins", body = [AdminResponse]),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN role required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/admins")]
pub async fn list_admins(caller: AdminAuth, store: web::Data<AdminStore>) -> AppResult<HttpResponse> {
    authorize(&caller.0, SUPERADMIN_ONLY)?;

    let admins = store.list().await?;
    let items: Vec<AdminResponse> = admins.into_iter().map(AdminResponse::from).collect();

    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// Create an admin. The role defaults to ADMIN.
#[utoipa::path(
    post,
    path = "/api/v1/admins",
    tag = "Admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminResponse),
        (status = 400, description = "Missing fields, bad email, bad role, or email already exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN role required", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[post("/admins")]
pub async fn create_admin(
    caller: AdminAuth,
    body: JsonBody<CreateAdminRequest>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, SUPERADMIN_ONLY)?;

    let req = body.into_inner();
    check_required_fields(&[
        ("username", req.username.as_deref()),
        ("email", req.email.as_deref()),
        ("password", req.password.as_deref()),
    ])?;

    let email = req.email.unwrap_or_default();
    ensure_email(&email)?;

    let role = match non_empty(req.role) {
        Some(role) => parse_role(&role)?,
        None => AdminRole::default(),
    };

    let password_hash = password::hash(SecretString::from(req.password.unwrap_or_default())).await?;

    let admin = store
        .create(NewAdmin {
            username: req.username.unwrap_or_default(),
            email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!(
        admin_id = admin.id,
        role = %admin.role,
        created_by = caller.id,
        "Admin created"
    );

    Ok(HttpResponse::Created().json(DataResponse::new(AdminResponse::from(admin))))
}

/// Get one admin.
#[utoipa::path(
    get,
    path = "/api/v1/admins/{id}",
    tag = "Admins",
    params(
        ("id" = i32, Path, description = "Admin ID")
    ),
    responses(
        (status = 200, description = "Admin details", body = AdminResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Admin not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[get("/admins/{id}")]
pub async fn get_admin(
    caller: AdminAuth,
    path: web::Path<i32>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, SUPERADMIN_ONLY)?;

    let admin = store
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("admin".to_string()))?;

    Ok(HttpResponse::Ok().json(DataResponse::new(AdminResponse::from(admin))))
}

/// Update another admin's username, email or role.
#[utoipa::path(
    put,
    path = "/api/v1/admins/{id}",
    tag = "Admins",
    params(
        ("id" = i32, Path, description = "Admin ID")
    ),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin updated", body = AdminUpdatedResponse),
        (status = 400, description = "Bad email, bad role, or email already exists", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Admin not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[put("/admins/{id}")]
pub async fn update_admin(
    caller: AdminAuth,
    path: web::Path<i32>,
    body: JsonBody<UpdateAdminRequest>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, SUPERADMIN_ONLY)?;

    let req = body.into_inner();
    let role = match non_empty(req.role) {
        Some(role) => Some(parse_role(&role)?),
        None => None,
    };
    let changes = AdminChanges {
        username: non_empty(req.username),
        email: non_empty(req.email),
        password_hash: None,
        role,
    };

    apply_update(store.get_ref(), path.into_inner(), changes).await
}

/// Delete an admin.
#[utoipa::path(
    delete,
    path = "/api/v1/admins/{id}",
    tag = "Admins",
    params(
        ("id" = i32, Path, description = "Admin ID")
    ),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "SUPERADMIN role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Admin not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[delete("/admins/{id}")]
pub async fn delete_admin(
    caller: AdminAuth,
    path: web::Path<i32>,
    store: web::Data<AdminStore>,
) -> AppResult<HttpResponse> {
    authorize(&caller.0, SUPERADMIN_ONLY)?;

    let id = path.into_inner();
    store.delete(id).await?;
    tracing::info!(admin_id = id, deleted_by = caller.id, "Admin deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// Validate, apply and echo an admin update.
async fn apply_update(
    store: &AdminStore,
    id: i32,
    changes: AdminChanges,
) -> AppResult<HttpResponse> {
    if let Some(email) = changes.email.as_deref() {
        ensure_email(email)?;
    }

    let echo = AdminUpdatedResponse {
        username: changes.username.clone(),
        email: changes.email.clone(),
        role: changes.role,
        updated_at: None,
    };

    let updated = store.update(id, changes).await?;

    Ok(HttpResponse::Ok().json(DataResponse::new(AdminUpdatedResponse {
        updated_at: updated.updated_at,
        ..echo
    })))
}
