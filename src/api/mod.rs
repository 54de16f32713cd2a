//! API endpoint modules and application wiring.

pub mod admins;
pub mod auth;
mod body;
pub mod customers;
pub mod health;
pub mod openapi;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::TokenService;
use crate::db::{AdminStore, CustomerStore, Stores};
use crate::error::{AppError, AppResult};

pub use admins::configure_routes as configure_admin_routes;
pub use auth::configure_routes as configure_auth_routes;
pub use body::JsonBody;
pub use customers::configure_routes as configure_customer_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Message for non-empty request bodies that are not valid JSON for the endpoint.
pub const INVALID_BODY_MSG: &str = "invalid request body";

/// Shared state cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(stores: Stores, tokens: TokenService) -> Self {
        Self { stores, tokens }
    }

    /// Register the shared state and every route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::<AdminStore>::from(self.stores.admins.clone()))
            .app_data(web::Data::<CustomerStore>::from(self.stores.customers.clone()))
            .app_data(web::Data::new(self.tokens.clone()));
        configure(cfg);
    }
}

/// Configure every `/api/v1` route plus extractor error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config()).service(
        web::scope("/api/v1")
            .configure(configure_health_routes)
            .configure(configure_auth_routes)
            .configure(configure_admin_routes)
            .configure(configure_customer_routes),
    );
}

/// Unparseable path parameters are reported like unknown routes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected path parameter: {}", err);
        AppError::NotFound("route".to_string()).into()
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    tracing::debug!(path = %req.path(), "No route matched");
    Err(AppError::NotFound("route".to_string()))
}
