//! CLI tool to bootstrap the first SUPERADMIN account.
//!
//! Usage:
//!   cargo run --bin create-superadmin -- --username root --email root@shop.example --password '...'

use std::env;

use storefront_lib::auth::password;
use storefront_lib::config::Config;
use storefront_lib::db::{CredentialStore, DbPool};
use storefront_lib::models::{Admin, AdminRole, NewAdmin};
use storefront_lib::validation::validate_email;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let mut username: Option<String> = None;
    let mut email: Option<String> = None;
    let mut plaintext: Option<String> = env::var("SF_SUPERADMIN_PASSWORD").ok();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--username" | "-u" => {
                i += 1;
                username = args.get(i).cloned();
            }
            "--email" | "-e" => {
                i += 1;
                email = args.get(i).cloned();
            }
            "--password" | "-p" => {
                i += 1;
                plaintext = args.get(i).cloned();
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(username), Some(email), Some(plaintext)) = (username, email, plaintext) else {
        eprintln!("Error: --username, --email and --password are required");
        print_usage();
        std::process::exit(1);
    };

    if !validate_email(&email) {
        eprintln!("Error: '{}' is not a valid email address", email);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if config.uses_memory_store() {
        eprintln!("Error: DATABASE_URL points at the in-memory store; nothing would be saved");
        std::process::exit(1);
    }

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    let password_hash = match password::hash_password(&plaintext) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    };

    let new_admin = NewAdmin {
        username,
        email,
        password_hash,
        role: AdminRole::Superadmin,
    };
    let admin: Admin = match CredentialStore::<Admin>::create(&pool, new_admin).await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error creating admin: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("  SUPERADMIN created");
    println!();
    println!("  ID:       {}", admin.id);
    println!("  Username: {}", admin.username);
    println!("  Email:    {}", admin.email);
    println!();
    println!("  Sign in with POST /api/v1/admins/login");
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: create-superadmin --username <name> --email <email> --password <password>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --username, -u  Display name (required)");
    eprintln!("  --email, -e     Sign-in email (required)");
    eprintln!("  --password, -p  Sign-in password (or set SF_SUPERADMIN_PASSWORD)");
    eprintln!("  --help, -h      Show this help");
    eprintln!();
}
