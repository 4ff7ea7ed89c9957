//! Builds the HTTP state from the configured repository.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use members_api::domain::MemberRegistrationService;
use members_api::domain::ports::{MemberRepository, UuidV7MemberIdGenerator};
use members_api::inbound::http::state::HttpState;
use members_api::outbound::memory::InMemoryMemberRepository;
use members_api::outbound::persistence::DieselMemberRepository;

use super::ServerConfig;

fn state_for<R>(repo: R) -> HttpState
where
    R: MemberRepository + 'static,
{
    let service = MemberRegistrationService::new(
        Arc::new(repo),
        Arc::new(UuidV7MemberIdGenerator),
        Arc::new(DefaultClock),
    );
    HttpState::from_service(Arc::new(service))
}

/// Wire the registration service to PostgreSQL when a pool is configured,
/// otherwise to the in-process store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_for(DieselMemberRepository::new(pool.clone())),
        None => {
            warn!("no database configured; members are kept in memory and lost on restart");
            state_for(InMemoryMemberRepository::new())
        }
    };
    web::Data::new(state)
}
