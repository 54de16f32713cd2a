//! Request logging middleware.
//!
//! One line when a request arrives and one when it completes, at a level
//! chosen by the response status.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{AUTHORIZATION, USER_AGENT};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::auth::bearer_token;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let credential = credential_kind(
            req.headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
        );

        info!(
            target: "api",
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            user_agent = %user_agent,
            credential,
            "Request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status().as_u16();
            let duration_ms = start.elapsed().as_millis() as u64;

            match status {
                500.. => error!(target: "api", method = %method, path = %path, status, duration_ms, "Request failed"),
                400..=499 => warn!(target: "api", method = %method, path = %path, status, duration_ms, "Request rejected"),
                _ => info!(target: "api", method = %method, path = %path, status, duration_ms, "Request completed"),
            }

            Ok(res)
        })
    }
}

/// Classify an `Authorization` header without exposing its value.
fn credential_kind(header: Option<&str>) -> &'static str {
    match header {
        Some(value) if bearer_token(value).is_some() => "bearer",
        Some(_) => "other",
        None => "none",
    }
}
