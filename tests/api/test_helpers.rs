//! Shared test helpers for the HTTP API suite.

use actix_web::{App, dev::ServiceResponse, test, web};
use chrono::Duration;
use secrecy::SecretString;
use serde_json::Value;

use storefront_lib::api::{self, AppState};
use storefront_lib::auth::{SubjectKind, TokenService, password};
use storefront_lib::db::Stores;
use storefront_lib::middleware::RequestLogger;
use storefront_lib::models::{Admin, AdminRole, Customer, NewAdmin, NewCustomer};

/// Signing secret used by every test app.
pub const TEST_JWT_SECRET: &str = "api-suite-signing-secret";

/// Password given to every seeded account.
pub const TEST_PASSWORD: &str = "Passw0rd!";

/// Fresh state over an empty in-memory store.
pub fn create_test_state() -> AppState {
    let tokens = TokenService::new(
        &SecretString::from(TEST_JWT_SECRET.to_string()),
        Duration::hours(1),
    );
    AppState::new(Stores::memory(), tokens)
}

/// Build the app the way the server binary does.
pub async fn create_test_app(
    state: &AppState,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .configure(|cfg| state.configure(cfg))
            .default_service(web::route().to(api::not_found)),
    )
    .await
}

/// Insert an admin directly into the store.
pub async fn seed_admin(state: &AppState, email: &str, role: AdminRole) -> Admin {
    state
        .stores
        .admins
        .create(NewAdmin {
            username: email.split('@').next().unwrap_or("admin").to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(TEST_PASSWORD).unwrap(),
            role,
        })
        .await
        .expect("Failed to seed admin")
}

/// Insert a customer directly into the store.
pub async fn seed_customer(state: &AppState, email: &str) -> Customer {
    state
        .stores
        .customers
        .create(NewCustomer {
            fullname: "Jane Doe".to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(TEST_PASSWORD).unwrap(),
            shipping_address: "1 Main St".to_string(),
            phone: None,
        })
        .await
        .expect("Failed to seed customer")
}

/// Token for a seeded admin, minted without going through login.
pub fn admin_token(state: &AppState, admin: &Admin) -> String {
    state
        .tokens
        .issue(SubjectKind::Admin, admin.id, Some(admin.role))
        .unwrap()
}

/// Token for a seeded customer, minted without going through login.
pub fn customer_token(state: &AppState, customer: &Customer) -> String {
    state
        .tokens
        .issue(SubjectKind::Customer, customer.id, None)
        .unwrap()
}

/// `Authorization` header for a bearer token.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Send a request and return the status and the parsed body (`Null` when empty).
pub async fn send<S>(app: &S, req: test::TestRequest) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, bytes) = send_raw(app, req).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, body)
}

/// Send a request and return the status and the raw body bytes.
pub async fn send_raw<S>(app: &S, req: test::TestRequest) -> (u16, Vec<u8>)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    (status, bytes.to_vec())
}
