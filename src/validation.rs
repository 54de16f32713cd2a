//! Request argument checks run before any credential or store work.
//!
//! Required-field checks aggregate every violation into one report. Shape
//! checks (email, role) fail individually.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, ErrorDetail};
use crate::models::AdminRole;

/// Message for a role outside the admin role enum.
pub const INVALID_ROLE_MSG: &str = "role type is not valid";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld, no whitespace and a single @
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Report every absent or empty field at once.
///
/// Field names are given in their wire (camelCase) form; the detail code is
/// `missing` followed by the name with its first letter upper-cased.
pub fn check_required_fields(fields: &[(&str, Option<&str>)]) -> Result<(), AppError> {
    let detail: Vec<ErrorDetail> = fields
        .iter()
        .filter(|(_, value)| value.is_none_or(str::is_empty))
        .map(|(name, _)| missing_field(name))
        .collect();

    if detail.is_empty() {
        Ok(())
    } else {
        Err(AppError::invalid_arguments(detail))
    }
}

fn missing_field(name: &str) -> ErrorDetail {
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    ErrorDetail::new(
        format!("missing{}", capitalized),
        format!("{} field is missing", name),
    )
}

/// Whether `value` has the shape of an email address.
pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// [`validate_email`], failing with the `email is not valid` error.
pub fn ensure_email(value: &str) -> Result<(), AppError> {
    if validate_email(value) {
        Ok(())
    } else {
        Err(AppError::invalid_email())
    }
}

/// Parse an admin role in its exact wire form.
pub fn parse_role(value: &str) -> Result<AdminRole, AppError> {
    AdminRole::parse(value).ok_or_else(|| AppError::InvalidArgument {
        message: INVALID_ROLE_MSG.to_string(),
        detail: Some(vec![ErrorDetail::new(
            "invalidRole",
            "role must be one of 'SUPERADMIN', 'ADMIN', and 'MODERATOR'",
        )]),
    })
}
