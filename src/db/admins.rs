//! Database operations for admins.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use super::{CredentialStore, DbPool, StoreError, StoreResult};
use crate::entity::admin;
use crate::models::{Admin, AdminChanges, AdminRole, NewAdmin};

/// Find an admin by email.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> StoreResult<Option<Admin>> {
    admin::Entity::find()
        .filter(admin::Column::Email.eq(email))
        .one(db)
        .await?
        .map(model_to_admin)
        .transpose()
}

/// Find an admin by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> StoreResult<Option<Admin>> {
    admin::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(model_to_admin)
        .transpose()
}

/// List all admins, oldest first.
pub async fn list_all(db: &DatabaseConnection) -> StoreResult<Vec<Admin>> {
    admin::Entity::find()
        .order_by_asc(admin::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(model_to_admin)
        .collect()
}

/// Insert a new admin.
pub async fn insert(db: &DatabaseConnection, new: NewAdmin) -> StoreResult<Admin> {
    let model = admin::ActiveModel {
        id: NotSet,
        username: Set(new.username),
        email: Set(new.email),
        password: Set(new.password_hash),
        role: Set(new.role.as_str().to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    let result = admin::Entity::insert(model).exec(db).await?;

    find_by_id(db, result.last_insert_id)
        .await?
        .ok_or_else(|| StoreError::Backend("Failed to fetch newly inserted admin".to_string()))
}

/// Apply a partial update.
pub async fn update(db: &DatabaseConnection, id: i32, changes: AdminChanges) -> StoreResult<Admin> {
    let existing = admin::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("admin"))?;

    let mut active: admin::ActiveModel = existing.into();
    if let Some(username) = changes.username {
        active.username = Set(username);
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(password_hash) = changes.password_hash {
        active.password = Set(password_hash);
    }
    if let Some(role) = changes.role {
        active.role = Set(role.as_str().to_string());
    }
    active.updated_at = Set(Some(Utc::now()));

    let updated = active.update(db).await?;
    model_to_admin(updated)
}

/// Delete an admin.
pub async fn delete(db: &DatabaseConnection, id: i32) -> StoreResult<()> {
    let result = admin::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound("admin"));
    }
    Ok(())
}

fn model_to_admin(m: admin::Model) -> StoreResult<Admin> {
    let role = AdminRole::parse(&m.role).ok_or_else(|| {
        StoreError::Backend(format!("admin {} has unknown role '{}'", m.id, m.role))
    })?;

    Ok(Admin {
        id: m.id,
        username: m.username,
        email: m.email,
        password_hash: m.password,
        role,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

#[async_trait]
impl CredentialStore<Admin> for DbPool {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Admin>> {
        find_by_email(self.connection(), email).await
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Admin>> {
        find_by_id(self.connection(), id).await
    }

    async fn list(&self) -> StoreResult<Vec<Admin>> {
        list_all(self.connection()).await
    }

    async fn create(&self, new: NewAdmin) -> StoreResult<Admin> {
        insert(self.connection(), new).await
    }

    async fn update(&self, id: i32, changes: AdminChanges) -> StoreResult<Admin> {
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
