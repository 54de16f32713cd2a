//! Stateless bearer tokens (HS256 JWT).
//!
//! Every token carries `{sub, kind, role?, iat, exp}` and is signed with the
//! one process-wide secret. Tokens are never stored; a token stays valid
//! until `exp` and there is no revocation list.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::error::{AppError, AppResult};
use crate::models::AdminRole;

/// Which credential store a token's subject lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Admin,
    Customer,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub kind: SubjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    pub iat: i64,
    pub exp: i64,
}

/// What a valid token asserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject_id: i32,
    pub kind: SubjectKind,
    pub role: Option<AdminRole>,
}

/// Why a token was rejected. Callers only ever see "authentication required".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        // exp is checked in verify_at against an explicit clock, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
            ttl,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, settings.expires_in)
    }

    /// Lifetime of every token this service issues.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from now.
    pub fn issue(
        &self,
        kind: SubjectKind,
        subject_id: i32,
        role: Option<AdminRole>,
    ) -> AppResult<String> {
        self.issue_at(kind, subject_id, role, Utc::now())
    }

    /// Issue a token as if the clock read `issued_at`.
    pub fn issue_at(
        &self,
        kind: SubjectKind,
        subject_id: i32,
        role: Option<AdminRole>,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token lifetime overflows the clock".to_string()))?;
        let claims = TokenClaims {
            sub: subject_id.to_string(),
            kind,
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`. Expired when `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;
        let claims = data.claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        let subject_id = claims.sub.parse::<i32>().map_err(|_| TokenError::Malformed)?;

        Ok(VerifiedToken {
            subject_id,
            kind: claims.kind,
            role: claims.role,
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
