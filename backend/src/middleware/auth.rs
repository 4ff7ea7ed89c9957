//! Authentication gate applied in front of the members endpoints.
//!
//! A request is admitted when it carries an `Authorization: Bearer …` header
//! (the upstream gateway has already verified the token) or an `X-API-Key`
//! header matching the configured shared secret. Probe paths bypass the gate.
//! Rejections short-circuit with `401 {"error": "Unauthorized"}` before any
//! handler runs.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

const BEARER_PREFIX: &str = "Bearer ";
const PUBLIC_PATHS: [&str; 2] = ["/", "/healthz"];

/// Shared secret accepted through [`API_KEY_HEADER`].
///
/// The raw bytes are wiped on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a configured secret. Blank values are refused.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.trim().is_empty() {
            return None;
        }
        Some(Self(secret))
    }

    fn matches(&self, presented: &[u8]) -> bool {
        Sha256::digest(self.0.as_bytes()) == Sha256::digest(presented)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(**redacted**)")
    }
}

/// Decides whether a request may reach the members endpoints.
#[derive(Clone, Debug, Default)]
pub struct AuthGate {
    api_key: Option<Arc<ApiKey>>,
}

impl AuthGate {
    /// Build a gate. Without a key only bearer tokens are admitted.
    #[must_use]
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key: api_key.map(Arc::new),
        }
    }

    /// Whether `path` bypasses authentication.
    #[must_use]
    pub fn is_public(path: &str) -> bool {
        PUBLIC_PATHS.contains(&path)
    }

    /// Whether the headers carry acceptable credentials.
    #[must_use]
    pub fn admits(&self, headers: &HeaderMap) -> bool {
        let has_bearer = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(BEARER_PREFIX));
        if has_bearer {
            return true;
        }

        match (&self.api_key, headers.get(API_KEY_HEADER)) {
            (Some(expected), Some(presented)) => expected.matches(presented.as_bytes()),
            _ => false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

/// Service produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    gate: AuthGate,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if AuthGate::is_public(req.path()) || self.gate.admits(req.headers()) {
            let service = Rc::clone(&self.service);
            return Box::pin(async move {
                service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body)
            });
        }

        Box::pin(async move {
            // Built inside the future so the trace id in scope is captured.
            warn!(path = %req.path(), method = %req.method(), "rejected unauthenticated request");
            let response = domain::Error::unauthorized("Unauthorized").error_response();
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
