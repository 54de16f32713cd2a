//! Salted password hashing with Argon2id.
//!
//! Hashing is CPU-bound; the async entry points run it on the actix blocking
//! pool so a login never stalls the worker's event loop.

use actix_web::web;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AppError, AppResult};

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Check a plaintext password against a stored PHC string.
///
/// A stored value that does not parse as a PHC string never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] on the blocking pool.
pub async fn hash(password: SecretString) -> AppResult<String> {
    web::block(move || hash_password(password.expose_secret())).await?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify(password: SecretString, password_hash: String) -> AppResult<bool> {
    let matches = web::block(move || verify_password(password.expose_secret(), &password_hash))
        .await?;
    Ok(matches)
}
