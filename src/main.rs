//! Storefront server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use storefront_lib::api::{self, ApiDoc, AppState};
use storefront_lib::auth::TokenService;
use storefront_lib::config::Config;
use storefront_lib::db::{DbPool, Stores};
use storefront_lib::middleware::RequestLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and SF_JWT_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Storefront Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let stores = if config.uses_memory_store() {
        warn!("Using the in-memory credential store; accounts are lost on exit");
        Stores::memory()
    } else {
        let pool = match DbPool::new(&config).await {
            Ok(pool) => pool,
            Err(e) => {
                error!("Failed to connect to database: {}", e);
                std::process::exit(1);
            }
        };
        info!("Database connection established");

        if let Err(e) = pool.run_migrations().await {
            error!("Failed to run migrations: {}", e);
            std::process::exit(1);
        }
        info!("Database migrations complete");

        Stores::postgres(pool)
    };

    let tokens = TokenService::from_settings(&config.jwt);
    info!(
        "Bearer tokens expire after {} hours",
        tokens.ttl().num_hours()
    );

    let state = AppState::new(stores, tokens);
    let bind_address = config.bind_address();

    let worker_count = if config.is_development() {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            .configure(|cfg| state.configure(cfg))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .default_service(web::route().to(api::not_found))
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
