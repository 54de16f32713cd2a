//! Database operations for customers.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use super::{CredentialStore, DbPool, StoreError, StoreResult};
use crate::entity::customer;
use crate::models::{Customer, CustomerChanges, NewCustomer};

/// Find a customer by email.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> StoreResult<Option<Customer>> {
    let result = customer::Entity::find()
        .filter(customer::Column::Email.eq(email))
        .one(db)
        .await?;

    Ok(result.map(model_to_customer))
}

/// Find a customer by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> StoreResult<Option<Customer>> {
    let result = customer::Entity::find_by_id(id).one(db).await?;
    Ok(result.map(model_to_customer))
}

/// List all customers, oldest first.
pub async fn list_all(db: &DatabaseConnection) -> StoreResult<Vec<Customer>> {
    let rows = customer::Entity::find()
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(model_to_customer).collect())
}

/// Insert a new customer.
pub async fn insert(db: &DatabaseConnection, new: NewCustomer) -> StoreResult<Customer> {
    let model = customer::ActiveModel {
        id: NotSet,
        fullname: Set(new.fullname),
        email: Set(new.email),
        password: Set(new.password_hash),
        shipping_address: Set(new.shipping_address),
        phone: Set(new.phone),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    let result = customer::Entity::insert(model).exec(db).await?;

    find_by_id(db, result.last_insert_id)
        .await?
        .ok_or_else(|| StoreError::Backend("Failed to fetch newly inserted customer".to_string()))
}

/// Apply a partial update.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: CustomerChanges,
) -> StoreResult<Customer> {
    let existing = customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("customer"))?;

    let mut active: customer::ActiveModel = existing.into();
    if let Some(fullname) = changes.fullname {
        active.fullname = Set(fullname);
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(password_hash) = changes.password_hash {
        active.password = Set(password_hash);
    }
    if let Some(shipping_address) = changes.shipping_address {
        active.shipping_address = Set(shipping_address);
    }
    if let Some(phone) = changes.phone {
        active.phone = Set(Some(phone));
    }
    active.updated_at = Set(Some(Utc::now()));

    let updated = active.update(db).await?;
    Ok(model_to_customer(updated))
}

/// Delete a customer.
pub async fn delete(db: &DatabaseConnection, id: i32) -> StoreResult<()> {
    let result = customer::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound("customer"));
    }
    Ok(())
}

fn model_to_customer(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        fullname: m.fullname,
        email: m.email,
        password_hash: m.password,
        shipping_address: m.shipping_address,
        phone: m.phone,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CredentialStore<Customer> for DbPool {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        find_by_email(self.connection(), email).await
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Customer>> {
        find_by_id(self.connection(), id).await
    }

    async fn list(&self) -> StoreResult<Vec<Customer>> {
        list_all(self.connection()).await
    }

    async fn create(&self, new: NewCustomer) -> StoreResult<Customer> {
        insert(self.connection(), new).await
    }

    async fn update(&self, id: i32, changes: CustomerChanges) -> StoreResult<Customer> {
        update(self.connection(), id, changes).await
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        delete(self.connection(), id).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.connection().ping().await?;
        Ok(())
    }
}
