//! Credential store: connection management and the repository seam.
//!
//! Handlers and the auth extractor only see [`CredentialStore`]. Two backends
//! implement it: [`DbPool`] (PostgreSQL via SeaORM) and
//! [`memory::MemoryStore`].

pub mod admins;
pub mod customers;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::error::AppResult;
use crate::migration::Migrator;
use crate::models::{Admin, AdminChanges, Customer, CustomerChanges, NewAdmin, NewCustomer};

/// Failure signals from a credential store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with the given key; carries the resource name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique constraint rejected the write; carries the field name.
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        // email is the only unique column besides the primary key
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict("email"),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// A persisted credential record.
pub trait Record: Clone + Send + Sync + 'static {
    /// Insert payload.
    type New: Send + 'static;
    /// Partial update payload.
    type Changes: Send + 'static;
    /// Resource name used in not-found errors.
    const RESOURCE: &'static str;

    fn id(&self) -> i32;
    fn email(&self) -> &str;
}

impl Record for Admin {
    type New = NewAdmin;
    type Changes = AdminChanges;
    const RESOURCE: &'static str = "admin";

    fn id(&self) -> i32 {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }
}

impl Record for Customer {
    type New = NewCustomer;
    type Changes = CustomerChanges;
    const RESOURCE: &'static str = "customer";

    fn id(&self) -> i32 {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// Repository over one credential record type.
///
/// `create` and `update` report a duplicate email as
/// [`StoreError::Conflict`]; `update` and `delete` report a missing record as
/// [`StoreError::NotFound`]. `update` always advances `updated_at`.
#[async_trait]
pub trait CredentialStore<R: Record>: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<R>>;

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<R>>;

    async fn list(&self) -> StoreResult<Vec<R>>;

    async fn create(&self, new: R::New) -> StoreResult<R>;

    async fn update(&self, id: i32, changes: R::Changes) -> StoreResult<R>;

    async fn delete(&self, id: i32) -> StoreResult<()>;

    /// Readiness probe.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

pub type AdminStore = dyn CredentialStore<Admin>;
pub type CustomerStore = dyn CredentialStore<Customer>;

/// Both stores, as handed to the HTTP layer.
#[derive(Clone)]
pub struct Stores {
    pub admins: Arc<AdminStore>,
    pub customers: Arc<CustomerStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            admins: Arc::new(pool.clone()),
            customers: Arc::new(pool),
        }
    }

    /// Stores backed by one shared in-process store.
    pub fn memory() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        Self {
            admins: store.clone(),
            customers: store,
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect using the configured database URL.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(config.database_url.clone());
        opts.max_connections(config.db_max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        let conn = Database::connect(opts).await?;

        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }
}
