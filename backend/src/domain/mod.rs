//! Domain primitives, services and ports.
//!
//! Purpose: hold the signup rules independent of transport and storage.
//! Normalisers are pure functions; the registration service composes them
//! with the [`ports::MemberRepository`] to create, upgrade or return members.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - EmailKey, `canonical_form` — email dedupe key and analytics form.
//! - AddressInput, Address — boundary and stored address shapes.
//! - Member, MemberId, MemberStatus — the member aggregate.
//! - MemberRegistrationService — implementation of the driving ports.

pub mod address;
pub mod email;
pub mod error;
pub mod member;
pub mod ports;
pub mod registration;

pub use self::address::{
    Address, AddressInput, AddressValidationError, GeoPoint, normalize_address,
};
pub use self::email::{EmailKey, EmailValidationError, canonical_form, dedupe_key, is_plausible};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::member::{
    AddressUpgrade, DEFAULT_FIRST_NAME, DEFAULT_TIER, Member, MemberId, MemberStatus,
    UnknownMemberStatus,
};
pub use self::registration::MemberRegistrationService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use members_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
