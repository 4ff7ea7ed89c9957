//! Driving port for member signup.
//!
//! HTTP handlers call [`MemberRegistrationCommand`] with the submitted form.
//! The implementation decides whether to create a member, attach an address
//! to a pending one, or return the existing record untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AddressInput, Error, MemberId, MemberStatus};

/// Signup form as submitted.
///
/// Every field is optional at this level; `email` presence is checked by the
/// service so that a missing address is a domain validation failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address as typed.
    #[serde(default)]
    pub email: Option<String>,
    /// Membership tier.
    #[serde(default)]
    pub tier: Option<String>,
    /// Address in any supported shape.
    #[serde(default)]
    pub address: Option<AddressInput>,
}

/// Identifier and status of the member a signup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Member the signup resolved to.
    pub member_id: MemberId,
    /// Status after the signup was applied.
    pub status: MemberStatus,
}

/// Driving port for member signup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRegistrationCommand: Send + Sync {
    /// Register a signup idempotently.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when `email` is absent or blank and
    /// an internal error when storage fails.
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationResponse, Error>;
}

/// Fixture implementation returning a fixed pending member.
#[derive(Debug, Clone, Copy)]
pub struct FixtureMemberRegistrationCommand(pub MemberId);

#[async_trait]
impl MemberRegistrationCommand for FixtureMemberRegistrationCommand {
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationResponse, Error> {
        let has_address = crate::domain::normalize_address(request.address).is_some();
        Ok(RegistrationResponse {
            member_id: self.0,
            status: MemberStatus::for_address(has_address),
        })
    }
}
