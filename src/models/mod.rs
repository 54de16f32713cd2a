//! Domain models for the storefront server.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod admin;
pub mod customer;

// Re-export commonly used types
pub use admin::{
    Admin, AdminChanges, AdminResponse, AdminRole, AdminUpdatedResponse, CreateAdminRequest,
    NewAdmin, UpdateAdminRequest, UpdateAdminSelfRequest,
};
pub use customer::{
    Customer, CustomerChanges, CustomerResponse, CustomerUpdatedResponse, NewCustomer,
    RegisterCustomerRequest, UpdateCustomerSelfRequest,
};

/// Login request shared by admins and customers.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Change-password request shared by admins and customers.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// `{ "success": true, "token": "..." }`
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
        }
    }
}

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true, "count": n, "data": [...] }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{ "success": true, "message": "..." }`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
