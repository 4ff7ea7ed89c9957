//! Request middleware.
//!
//! [`Trace`] tags each request with a trace identifier; [`AuthGate`] rejects
//! unauthenticated calls to non-probe routes.

pub mod auth;
pub mod trace;

pub use auth::{API_KEY_HEADER, ApiKey, AuthGate};
pub use trace::{Trace, TraceId};
