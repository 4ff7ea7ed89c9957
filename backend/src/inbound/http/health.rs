//! Probe endpoints: `GET /healthz` and `GET /`.
//!
//! Both bypass the authentication gate and return plain text.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Banner returned from the root path.
pub const ROOT_BANNER: &str = "Members API is running. Use POST /members.";

/// Readiness flag flipped once the listener is bound.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a state that reports not ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether the service accepts traffic.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Health probe. `200 ok` once ready, `503` before.
#[utoipa::path(
    get,
    path = "/healthz",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready", body = String, content_type = "text/plain"),
        (status = 503, description = "Server is still starting")
    )
)]
#[get("/healthz")]
pub async fn healthz(state: web::Data<HealthState>) -> HttpResponse {
    let mut response = if state.is_ready() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("text/plain; charset=utf-8")
        .body(if state.is_ready() { "ok" } else { "starting" })
}

/// Static banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Service banner", body = String, content_type = "text/plain")
    )
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(ROOT_BANNER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn healthz_reflects_readiness() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(App::new().app_data(state.clone()).service(healthz)).await;

        let before = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request())
            .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.mark_ready();
        let after = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request())
            .await;
        assert_eq!(after.status(), StatusCode::OK);
        assert_eq!(test::read_body(after).await.as_ref(), b"ok");
    }

    #[actix_web::test]
    async fn root_returns_banner() {
        let app = test::init_service(App::new().service(root)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await.as_ref(), ROOT_BANNER.as_bytes());
    }
}
