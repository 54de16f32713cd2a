//! Actix-web extractor for bearer token authentication.
//!
//! Every failure on the way from header to principal (missing header, wrong
//! scheme, bad signature, expiry, wrong token kind, deleted account) produces
//! the same 401 body. The concrete reason is only logged at debug level.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use super::Principal;
use super::token::TokenService;
use crate::db::CredentialStore;
use crate::error::AppError;
use crate::models::{Admin, Customer};

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Extractor that requires a valid bearer token for principal type `P`.
///
/// ```ignore
/// async fn handler(auth: AdminAuth) -> AppResult<HttpResponse> {
///     let admin = auth.into_inner();
///     // ...
/// }
/// ```
///
/// The principal is re-read from the store on every request, so a role
/// change or deletion takes effect immediately.
#[derive(Debug, Clone)]
pub struct Authenticated<P: Principal>(pub P);

impl<P: Principal> Authenticated<P> {
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: Principal> std::ops::Deref for Authenticated<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.0
    }
}

pub type AdminAuth = Authenticated<Admin>;
pub type CustomerAuth = Authenticated<Customer>;

impl<P: Principal> FromRequest for Authenticated<P> {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = req.app_data::<web::Data<TokenService>>().cloned();
        let store = req.app_data::<web::Data<dyn CredentialStore<P>>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Box::pin(async move {
            let (Some(tokens), Some(store)) = (tokens, store) else {
                return Err(AppError::Internal(
                    "authentication state is not configured".to_string(),
                ));
            };

            authenticate(&tokens, store.get_ref(), header.as_deref())
                .await
                .map(Authenticated)
        })
    }
}

/// Resolve an `Authorization` header value to a live principal.
pub(crate) async fn authenticate<P: Principal>(
    tokens: &TokenService,
    store: &dyn CredentialStore<P>,
    header: Option<&str>,
) -> Result<P, AppError> {
    let Some(header) = header else {
        tracing::debug!("No Authorization header");
        return Err(AppError::auth_required());
    };

    let Some(token) = bearer_token(header) else {
        tracing::debug!("Authorization header is not a bearer credential");
        return Err(AppError::auth_required());
    };

    let verified = tokens.verify(token).map_err(|e| {
        tracing::debug!("Bearer token rejected: {}", e);
        AppError::auth_required()
    })?;

    if verified.kind != P::KIND {
        tracing::debug!(
            expected = ?P::KIND,
            actual = ?verified.kind,
            "Bearer token issued for another principal type"
        );
        return Err(AppError::auth_required());
    }

    match store.find_by_id(verified.subject_id).await? {
        Some(principal) => Ok(principal),
        None => {
            tracing::debug!(
                subject_id = verified.subject_id,
                "Bearer token subject no longer exists"
            );
            Err(AppError::auth_required())
        }
    }
}
