//! Customer account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer stored in the credential store.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    /// Argon2 PHC string, never serialized.
    pub password_hash: String,
    pub shipping_address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields needed to insert a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub shipping_address: String,
    pub phone: Option<String>,
}

/// Partial update of a customer. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

/// Public view of a customer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    pub shipping_address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            fullname: c.fullname,
            email: c.email,
            shipping_address: c.shipping_address,
            phone: c.phone,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Customer self-registration.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

/// Customer self-update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerSelfRequest {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<String>,
    pub phone: Option<String>,
}

/// Fields echoed back after a self-update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdatedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
