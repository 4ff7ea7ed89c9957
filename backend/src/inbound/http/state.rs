//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without storage.

use std::sync::Arc;

use crate::domain::ports::{EmailAvailabilityQuery, MemberRegistrationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn MemberRegistrationCommand>,
    pub availability: Arc<dyn EmailAvailabilityQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        registration: Arc<dyn MemberRegistrationCommand>,
        availability: Arc<dyn EmailAvailabilityQuery>,
    ) -> Self {
        Self {
            registration,
            availability,
        }
    }

    /// Build state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: MemberRegistrationCommand + EmailAvailabilityQuery + 'static,
    {
        Self {
            registration: service.clone(),
            availability: service,
        }
    }
}
