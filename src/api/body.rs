//! JSON request body extractor.
//!
//! An empty body reads as `{}`, so handlers report missing fields instead of
//! rejecting the request. A non-empty body must be valid JSON for `T`.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use super::INVALID_BODY_MSG;
use crate::error::AppError;

fn invalid_body() -> AppError {
    AppError::InvalidArgument {
        message: INVALID_BODY_MSG.to_string(),
        detail: None,
    }
}

/// Request body deserialized from JSON, defaulting when the body is empty.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned + Default> JsonBody<T> {
    /// Decode raw body bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }
        serde_json::from_slice(bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            invalid_body()
        })
    }
}

impl<T: DeserializeOwned + Default + 'static> FromRequest for JsonBody<T> {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bytes = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = bytes.await.map_err(|e| {
                tracing::debug!("Failed to read request body: {}", e);
                invalid_body()
            })?;
            Self::parse(&bytes)
        })
    }
}
