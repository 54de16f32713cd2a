//! In-process credential store.
//!
//! Selected with `DATABASE_URL=memory:` for local development, and used by the
//! HTTP test suite. Accounts are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CredentialStore, Record, StoreError, StoreResult};
use crate::models::{Admin, AdminChanges, Customer, CustomerChanges, NewAdmin, NewCustomer};

/// One record type's rows.
pub struct Table<R> {
    next_id: i32,
    rows: BTreeMap<i32, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Record> Table<R> {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|r| r.email() == email && Some(r.id()) != except)
    }
}

/// Admins and customers held behind one lock each.
#[derive(Default)]
pub struct MemoryStore {
    admins: RwLock<Table<Admin>>,
    customers: RwLock<Table<Customer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-record glue between the generic table and the concrete models.
pub trait MemoryRecord: Record {
    fn table(store: &MemoryStore) -> &RwLock<Table<Self>>;
    fn build(id: i32, new: Self::New, now: DateTime<Utc>) -> Self;
    fn new_email(new: &Self::New) -> &str;
    fn changed_email(changes: &Self::Changes) -> Option<&str>;
    fn apply(&mut self, changes: Self::Changes, now: DateTime<Utc>);
}

impl MemoryRecord for Admin {
    fn table(store: &MemoryStore) -> &RwLock<Table<Self>> {
        &store.admins
    }

    fn build(id: i32, new: NewAdmin, now: DateTime<Utc>) -> Self {
        Admin {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
            updated_at: None,
        }
    }

    fn new_email(new: &NewAdmin) -> &str {
        &new.email
    }

    fn changed_email(changes: &AdminChanges) -> Option<&str> {
        changes.email.as_deref()
    }

    fn apply(&mut self, changes: AdminChanges, now: DateTime<Utc>) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        self.updated_at = Some(now);
    }
}

impl MemoryRecord for Customer {
    fn table(store: &MemoryStore) -> &RwLock<Table<Self>> {
        &store.customers
    }

    fn build(id: i32, new: NewCustomer, now: DateTime<Utc>) -> Self {
        Customer {
            id,
            fullname: new.fullname,
            email: new.email,
            password_hash: new.password_hash,
            shipping_address: new.shipping_address,
            phone: new.phone,
            created_at: now,
            updated_at: None,
        }
    }

    fn new_email(new: &NewCustomer) -> &str {
        &new.email
    }

    fn changed_email(changes: &CustomerChanges) -> Option<&str> {
        changes.email.as_deref()
    }

    fn apply(&mut self, changes: CustomerChanges, now: DateTime<Utc>) {
        if let Some(fullname) = changes.fullname {
            self.fullname = fullname;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(shipping_address) = changes.shipping_address {
            self.shipping_address = shipping_address;
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone);
        }
        self.updated_at = Some(now);
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

#[async_trait]
impl<R: MemoryRecord> CredentialStore<R> for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<R>> {
        let table = R::table(self).read().map_err(poisoned)?;
        Ok(table.rows.values().find(|r| r.email() == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<R>> {
        let table = R::table(self).read().map_err(poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<R>> {
        let table = R::table(self).read().map_err(poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, new: R::New) -> StoreResult<R> {
        let mut table = R::table(self).write().map_err(poisoned)?;
        if table.email_taken(R::new_email(&new), None) {
            return Err(StoreError::Conflict("email"));
        }

        let id = table.next_id;
        table.next_id += 1;
        let record = R::build(id, new, Utc::now());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, changes: R::Changes) -> StoreResult<R> {
        let mut table = R::table(self).write().map_err(poisoned)?;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound(R::RESOURCE));
        }
        if let Some(email) = R::changed_email(&changes)
            && table.email_taken(email, Some(id))
        {
            return Err(StoreError::Conflict("email"));
        }

        let record = table
            .rows
            .get_mut(&id)
            .ok_or(StoreError::NotFound(R::RESOURCE))?;
        record.apply(changes, Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut table = R::table(self).write().map_err(poisoned)?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(R::RESOURCE))
    }
}
