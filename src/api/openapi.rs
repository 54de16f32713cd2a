//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Server",
        version = "0.1.0",
        description = "Accounts, sign-in and role-gated back office for the storefront"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Customer auth endpoints
        api::auth::register,
        api::auth::login,
        api::auth::me,
        api::auth::update_details,
        api::auth::change_password,
        // Admin endpoints
        api::admins::login,
        api::admins::me,
        api::admins::change_password,
        api::admins::update_self,
        api::admins::list_admins,
        api::admins::create_admin,
        api::admins::get_admin,
        api::admins::update_admin,
        api::admins::delete_admin,
        // Customer management endpoints
        api::customers::list_customers,
        api::customers::get_customer,
        api::customers::delete_customer,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::ErrorObject,
            error::ErrorDetail,
            error::ErrorType,
            models::LoginRequest,
            models::ChangePasswordRequest,
            models::TokenResponse,
            models::MessageResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Admins
            models::AdminRole,
            models::AdminResponse,
            models::AdminUpdatedResponse,
            models::CreateAdminRequest,
            models::UpdateAdminRequest,
            models::UpdateAdminSelfRequest,
            // Customers
            models::CustomerResponse,
            models::CustomerUpdatedResponse,
            models::RegisterCustomerRequest,
            models::UpdateCustomerSelfRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Customer Auth", description = "Customer registration, sign-in and profile"),
        (name = "Admins", description = "Admin sign-in and admin account management"),
        (name = "Customers", description = "Customer account management")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
