//! Admin account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin role tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminRole {
    Superadmin,
    #[default]
    Admin,
    Moderator,
}

impl AdminRole {
    /// Every role, in declaration order.
    pub const ALL: [AdminRole; 3] = [Self::Superadmin, Self::Admin, Self::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "SUPERADMIN",
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
        }
    }

    /// Parse the wire form. Matching is exact: `admin` is not `ADMIN`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUPERADMIN" => Some(Self::Superadmin),
            "ADMIN" => Some(Self::Admin),
            "MODERATOR" => Some(Self::Moderator),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admin stored in the credential store.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never serialized.
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields needed to insert an admin.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}

/// Partial update of an admin. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<AdminRole>,
}

/// Public view of an admin.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
}

impl From<Admin> for AdminResponse {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            role: a.role,
        }
    }
}

/// Request to create an admin.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// One of SUPERADMIN, ADMIN, MODERATOR (default: ADMIN)
    pub role: Option<String>,
}

/// Request to update an admin by ID.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Request to update the calling admin.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAdminSelfRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Fields echoed back after an update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdatedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    pub updated_at: Option<DateTime<Utc>>,
}
