//! Application assembly shared by the HTTP integration suites.
//!
//! Mirrors the production wiring (trace, auth gate, handlers) over the
//! in-process repository so tests can inspect stored members.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use members_api::Trace;
use members_api::domain::MemberRegistrationService;
use members_api::domain::ports::UuidV7MemberIdGenerator;
use members_api::inbound::http::configure;
use members_api::inbound::http::health::HealthState;
use members_api::inbound::http::state::HttpState;
use members_api::middleware::{ApiKey, AuthGate};
use members_api::outbound::memory::InMemoryMemberRepository;

pub(crate) const API_KEY: &str = "test-shared-secret";

/// State shared across requests in one test.
#[derive(Clone)]
pub(crate) struct MembersApp {
    pub(crate) repo: Arc<InMemoryMemberRepository>,
    health: web::Data<HealthState>,
    http: web::Data<HttpState>,
    auth: AuthGate,
}

impl MembersApp {
    /// Ready app accepting [`API_KEY`] and bearer tokens.
    pub(crate) fn new() -> Self {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service = MemberRegistrationService::new(
            repo.clone(),
            Arc::new(UuidV7MemberIdGenerator),
            Arc::new(DefaultClock),
        );
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        Self {
            repo,
            health,
            http: web::Data::new(HttpState::from_service(Arc::new(service))),
            auth: AuthGate::new(ApiKey::new(API_KEY)),
        }
    }

    /// Number of stored members.
    pub(crate) fn member_count(&self) -> usize {
        self.repo.len().expect("repository lock")
    }

    pub(crate) fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.health.clone())
            .app_data(self.http.clone())
            .wrap(self.auth.clone())
            .wrap(Trace)
            .configure(configure)
    }
}
