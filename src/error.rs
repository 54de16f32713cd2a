//! Domain error types for the storefront server.
//!
//! Every rejected operation is reported through [`AppError`]. The actix
//! boundary is the only place an error is turned into an HTTP response, and
//! [`error_obj`] is the only place the error body is built.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Message returned for every missing, malformed or expired credential.
pub const AUTH_REQUIRED_MSG: &str = "authentication required";
/// Message returned when login credentials do not match.
pub const INCORRECT_CREDENTIALS_MSG: &str = "email or password is incorrect";
/// Message returned when the current password of a change-password call is wrong.
pub const INCORRECT_CURRENT_PASSWORD_MSG: &str = "current password is incorrect";
/// Message returned when an authenticated principal lacks the required role.
pub const UNAUTHORIZED_MSG: &str = "not authorized to perform this action";
/// Message for aggregated argument errors.
pub const INVALID_ARGUMENTS_MSG: &str = "invalid one or more argument(s)";
/// Message for a malformed email address.
pub const INVALID_EMAIL_MSG: &str = "email is not valid";

/// Error taxonomy shared by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ErrorType {
    InvalidArgument,
    AlreadyExists,
    Unauthenticated,
    Unauthorized,
    NotFound,
    Internal,
}

/// One entry of an aggregated validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Structured error report embedded in every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorObject {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ErrorDetail>>,
}

/// Error response body: `{ "success": false, "error": { ... } }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorObject,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.status, self.error.message)
    }
}

/// Build an error report.
pub fn error_obj(
    status: StatusCode,
    kind: ErrorType,
    message: impl Into<String>,
    detail: Option<Vec<ErrorDetail>>,
) -> ErrorObject {
    ErrorObject {
        status: status.as_u16(),
        kind,
        message: message.into(),
        detail,
    }
}

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input
    #[error("{message}")]
    InvalidArgument {
        message: String,
        detail: Option<Vec<ErrorDetail>>,
    },

    /// Uniqueness conflict on the named field
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Missing, invalid or expired credential
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated, but the role check failed
    #[error("{}", UNAUTHORIZED_MSG)]
    Unauthorized,

    /// Resource lookup miss
    #[error("{0} not found")]
    NotFound(String),

    /// Failure not attributable to caller input
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The uniform error for every authentication failure.
    pub fn auth_required() -> Self {
        AppError::Unauthenticated(AUTH_REQUIRED_MSG.to_string())
    }

    pub fn incorrect_credentials() -> Self {
        AppError::Unauthenticated(INCORRECT_CREDENTIALS_MSG.to_string())
    }

    pub fn invalid_email() -> Self {
        AppError::InvalidArgument {
            message: INVALID_EMAIL_MSG.to_string(),
            detail: None,
        }
    }

    pub fn invalid_arguments(detail: Vec<ErrorDetail>) -> Self {
        AppError::InvalidArgument {
            message: INVALID_ARGUMENTS_MSG.to_string(),
            detail: Some(detail),
        }
    }

    /// Error report for this error, as serialized at the HTTP boundary.
    pub fn to_error_object(&self) -> ErrorObject {
        let status = self.status_code();
        match self {
            AppError::InvalidArgument { message, detail } => {
                error_obj(status, ErrorType::InvalidArgument, message.clone(), detail.clone())
            }
            AppError::AlreadyExists(_) => {
                error_obj(status, ErrorType::AlreadyExists, self.to_string(), None)
            }
            AppError::Unauthenticated(message) => {
                error_obj(status, ErrorType::Unauthenticated, message.clone(), None)
            }
            AppError::Unauthorized => {
                error_obj(status, ErrorType::Unauthorized, UNAUTHORIZED_MSG, None)
            }
            AppError::NotFound(_) => error_obj(status, ErrorType::NotFound, self.to_string(), None),
            AppError::Internal(_) => {
                error_obj(status, ErrorType::Internal, "internal server error", None)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument { .. } | AppError::AlreadyExists(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(err_str) = self {
            tracing::error!("Internal error: {}", err_str);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            error: self.to_error_object(),
        })
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Internal(format!("database: {}", err))
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("blocking task: {}", err))
    }
}

impl From<crate::db::StoreError> for AppError {
    fn from(err: crate::db::StoreError) -> Self {
        use crate::db::StoreError;
        match err {
            StoreError::NotFound(resource) => AppError::NotFound(resource.to_string()),
            StoreError::Conflict(field) => AppError::AlreadyExists(field.to_string()),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}
