//! Members API library.
//!
//! Hexagonal layout:
//!
//! - [`domain`]: member model, email and address normalisation, ports, and
//!   the registration service.
//! - [`inbound`]: Actix handlers translating HTTP into port calls.
//! - [`outbound`]: repository adapters (PostgreSQL through Diesel, and an
//!   in-process map).
//! - [`middleware`]: request tracing and the authentication gate.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::trace::{Trace, TraceId};
