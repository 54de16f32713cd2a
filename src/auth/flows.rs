//! Login and password change, shared by every principal type.

use secrecy::SecretString;

use super::password;
use super::token::TokenService;
use super::Principal;
use crate::db::CredentialStore;
use crate::error::{AppError, AppResult, INCORRECT_CURRENT_PASSWORD_MSG};
use crate::models::{ChangePasswordRequest, LoginRequest};
use crate::validation::check_required_fields;

/// Exchange an email and password for a bearer token.
///
/// An unknown email and a wrong password fail identically.
pub async fn login<P: Principal>(
    store: &dyn CredentialStore<P>,
    tokens: &TokenService,
    req: LoginRequest,
) -> AppResult<String> {
    check_required_fields(&[
        ("email", req.email.as_deref()),
        ("password", req.password.as_deref()),
    ])?;
    let email = req.email.unwrap_or_default();
    let plaintext = SecretString::from(req.password.unwrap_or_default());

    let Some(principal) = store.find_by_email(&email).await? else {
        tracing::debug!("Login rejected: unknown email");
        return Err(AppError::incorrect_credentials());
    };

    if !password::verify(plaintext, principal.password_hash().to_string()).await? {
        tracing::debug!(principal_id = principal.id(), "Login rejected: wrong password");
        return Err(AppError::incorrect_credentials());
    }

    let token = tokens.issue(P::KIND, principal.id(), principal.role())?;
    tracing::info!(kind = ?P::KIND, principal_id = principal.id(), "Login succeeded");
    Ok(token)
}

/// Replace the principal's password after re-checking the current one.
pub async fn change_password<P: Principal>(
    store: &dyn CredentialStore<P>,
    principal: &P,
    req: ChangePasswordRequest,
) -> AppResult<()> {
    check_required_fields(&[
        ("currentPassword", req.current_password.as_deref()),
        ("newPassword", req.new_password.as_deref()),
    ])?;
    let current = SecretString::from(req.current_password.unwrap_or_default());
    let replacement = SecretString::from(req.new_password.unwrap_or_default());

    if !password::verify(current, principal.password_hash().to_string()).await? {
        return Err(AppError::Unauthenticated(
            INCORRECT_CURRENT_PASSWORD_MSG.to_string(),
        ));
    }

    let password_hash = password::hash(replacement).await?;
    store
        .update(principal.id(), P::password_changes(password_hash))
        .await?;

    tracing::info!(kind = ?P::KIND, principal_id = principal.id(), "Password changed");
    Ok(())
}
