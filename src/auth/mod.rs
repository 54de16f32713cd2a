//! Authentication and authorization.
//!
//! - [`password`]: Argon2 hashing of account passwords
//! - [`token`]: signed, expiring bearer tokens
//! - [`Authenticated`]: extractor resolving a bearer token to a live principal
//! - [`authorize`]: role gate over an authenticated principal
//! - [`login`], [`change_password`]: credential flows shared by admins and customers

mod extractor;
mod flows;
pub mod password;
pub mod token;

pub use extractor::{AdminAuth, Authenticated, CustomerAuth, bearer_token};
pub use flows::{change_password, login};
pub use token::{SubjectKind, TokenError, TokenService, VerifiedToken};

use crate::db::Record;
use crate::error::{AppError, AppResult};
use crate::models::{Admin, AdminChanges, AdminRole, Customer, CustomerChanges};

/// A record that can authenticate with a bearer token.
pub trait Principal: Record {
    /// Token `kind` claim this principal type accepts.
    const KIND: SubjectKind;

    /// Role for authorization checks. Customers have none.
    fn role(&self) -> Option<AdminRole>;

    /// Stored Argon2 PHC string.
    fn password_hash(&self) -> &str;

    /// Update payload that replaces only the password hash.
    fn password_changes(password_hash: String) -> Self::Changes;
}

impl Principal for Admin {
    const KIND: SubjectKind = SubjectKind::Admin;

    fn role(&self) -> Option<AdminRole> {
        Some(self.role)
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn password_changes(password_hash: String) -> AdminChanges {
        AdminChanges {
            password_hash: Some(password_hash),
            ..Default::default()
        }
    }
}

impl Principal for Customer {
    const KIND: SubjectKind = SubjectKind::Customer;

    fn role(&self) -> Option<AdminRole> {
        None
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn password_changes(password_hash: String) -> CustomerChanges {
        CustomerChanges {
            password_hash: Some(password_hash),
            ..Default::default()
        }
    }
}

/// Allow the call when the principal's role is one of `allowed`.
///
/// Matching is by exact set membership; no role implies another. A principal
/// without a role is always denied.
pub fn authorize<P: Principal>(principal: &P, allowed: &[AdminRole]) -> AppResult<()> {
    match principal.role() {
        Some(role) if allowed.contains(&role) => Ok(()),
        role => {
            tracing::debug!(
                principal_id = principal.id(),
                role = ?role,
                allowed = ?allowed,
                "Role check denied"
            );
            Err(AppError::Unauthorized)
        }
    }
}
