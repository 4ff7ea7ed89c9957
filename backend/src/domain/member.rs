//! Member aggregate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Address, EmailKey};

/// Placeholder used when a signup omits the first name.
pub const DEFAULT_FIRST_NAME: &str = "Member";
/// Membership tier assigned when a signup omits one.
pub const DEFAULT_TIER: &str = "Member";

/// Opaque member identifier.
///
/// Backed by a UUIDv7, so identifiers sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Registration progress of a member.
///
/// The only permitted transition is `PendingAddress` to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    /// Signed up without a usable mailing address.
    PendingAddress,
    /// Mailing address on file.
    Active,
}

impl MemberStatus {
    /// Status for a record holding (or lacking) an address.
    #[must_use]
    pub const fn for_address(has_address: bool) -> Self {
        if has_address {
            Self::Active
        } else {
            Self::PendingAddress
        }
    }

    /// Wire and storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingAddress => "pending-address",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown member status: {0}")]
pub struct UnknownMemberStatus(pub String);

impl FromStr for MemberStatus {
    type Err = UnknownMemberStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending-address" => Ok(Self::PendingAddress),
            "active" => Ok(Self::Active),
            other => Err(UnknownMemberStatus(other.to_owned())),
        }
    }
}

/// One durable record per distinct email key.
///
/// ## Invariants
/// - `email_key` is unique across members.
/// - `address` never returns to `None` once set, and `address_text` follows
///   it.
/// - `status` is `Active` exactly when `address` is present.
/// - `created_at` never changes; `updated_at` moves on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Primary key.
    pub member_id: MemberId,
    /// Display first name.
    pub first_name: String,
    /// Display last name, possibly empty.
    pub last_name: String,
    /// Address exactly as submitted.
    pub email: String,
    /// Dedupe key derived from `email`.
    pub email_key: EmailKey,
    /// Provider-aware canonical form, informational only.
    pub email_canonical: String,
    /// Membership tier.
    pub tier: String,
    /// Structured mailing address.
    pub address: Option<Address>,
    /// Flattened display line for `address`.
    pub address_text: Option<String>,
    /// Registration progress.
    pub status: MemberStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Whether a later signup carrying an address may complete this record.
    #[must_use]
    pub const fn awaits_address(&self) -> bool {
        self.address.is_none()
    }
}

/// Fields written when a pending member acquires an address.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressUpgrade {
    /// Address to attach.
    pub address: Address,
    /// Display line derived from `address`.
    pub address_text: Option<String>,
    /// Status after the upgrade; always [`MemberStatus::Active`].
    pub status: MemberStatus,
    /// Mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl AddressUpgrade {
    /// Build the upgrade for `address` stamped at `now`.
    #[must_use]
    pub fn new(address: Address, now: DateTime<Utc>) -> Self {
        let address_text = address.text().map(str::to_owned);
        Self {
            address,
            address_text,
            status: MemberStatus::Active,
            updated_at: now,
        }
    }

    /// Apply the upgrade to an in-memory record.
    pub fn apply_to(&self, member: &mut Member) {
        member.address = Some(self.address.clone());
        member.address_text.clone_from(&self.address_text);
        member.status = self.status;
        member.updated_at = self.updated_at;
    }
}
