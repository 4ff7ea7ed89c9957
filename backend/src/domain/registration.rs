//! Member registration service.
//!
//! Implements the signup decision per email key:
//!
//! - no record: create one, `active` when an address came with the signup,
//!   `pending-address` otherwise;
//! - record without address and the signup carries one: attach it and flip
//!   the record to `active`;
//! - anything else: return the record untouched. A different address for an
//!   already-active member is ignored on purpose.
//!
//! Lookup and write are not atomic. The repository rejects a second insert
//! for the same key and only upgrades records still lacking an address; when
//! either guard trips, the service re-reads and resolves against the winner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    EmailAvailability, EmailAvailabilityQuery, MemberIdGenerator, MemberRegistrationCommand,
    MemberRepository, MemberRepositoryError, PartialUpdateOutcome, RegistrationRequest,
    RegistrationResponse,
};
use crate::domain::{
    Address, AddressUpgrade, DEFAULT_FIRST_NAME, DEFAULT_TIER, EmailKey, Error, Member, MemberId,
    MemberStatus, canonical_form, is_plausible, normalize_address,
};

/// Registration service implementing the member driving ports.
#[derive(Clone)]
pub struct MemberRegistrationService<R> {
    repo: Arc<R>,
    ids: Arc<dyn MemberIdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R> MemberRegistrationService<R> {
    /// Create a new service.
    pub fn new(repo: Arc<R>, ids: Arc<dyn MemberIdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, ids, clock }
    }
}

/// Signup after validation and normalisation.
struct Signup {
    first_name: String,
    last_name: String,
    email: String,
    email_key: EmailKey,
    tier: String,
    address: Option<Address>,
}

impl Signup {
    fn try_from_request(request: RegistrationRequest) -> Result<Self, Error> {
        let RegistrationRequest {
            first_name,
            last_name,
            email,
            tier,
            address,
        } = request;

        let email = email.unwrap_or_default();
        let email_key = EmailKey::new(&email).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "email", "code": "missing_email" }))
        })?;

        Ok(Self {
            first_name: trimmed_or(first_name, DEFAULT_FIRST_NAME),
            last_name: trimmed_or(last_name, ""),
            email,
            email_key,
            tier: trimmed_or(tier, DEFAULT_TIER),
            address: normalize_address(address),
        })
    }

    fn into_member(self, member_id: MemberId, now: chrono::DateTime<chrono::Utc>) -> Member {
        let address_text = self
            .address
            .as_ref()
            .and_then(Address::text)
            .map(str::to_owned);
        Member {
            member_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email_canonical: canonical_form(&self.email),
            email: self.email,
            email_key: self.email_key,
            tier: self.tier,
            status: MemberStatus::for_address(self.address.is_some()),
            address: self.address,
            address_text,
            created_at: now,
            updated_at: now,
        }
    }
}

fn trimmed_or(value: Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

const fn respond(member_id: MemberId, status: MemberStatus) -> RegistrationResponse {
    RegistrationResponse { member_id, status }
}

fn map_repository_error(err: MemberRepositoryError) -> Error {
    error!(error = %err, "member repository failure");
    match err {
        MemberRepositoryError::Connection { message } => {
            Error::internal(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
        MemberRepositoryError::DuplicateEmailKey => {
            Error::internal("unexpected email key conflict")
        }
    }
}

impl<R> MemberRegistrationService<R>
where
    R: MemberRepository,
{
    async fn find(&self, email_key: &EmailKey) -> Result<Option<Member>, Error> {
        self.repo
            .find_by_email_key(email_key)
            .await
            .map_err(map_repository_error)
    }

    /// Re-read after losing a race; the record must exist by now.
    async fn find_winner(&self, email_key: &EmailKey) -> Result<Member, Error> {
        self.find(email_key)
            .await?
            .ok_or_else(|| Error::internal("member disappeared after a conflicting write"))
    }

    async fn create(&self, signup: Signup) -> Result<RegistrationResponse, Error> {
        let member = signup.into_member(self.ids.next_id(), self.clock.utc());
        match self.repo.insert(&member).await {
            Ok(()) => {
                info!(member_id = %member.member_id, status = %member.status, "member created");
                Ok(respond(member.member_id, member.status))
            }
            Err(MemberRepositoryError::DuplicateEmailKey) => {
                let winner = self.find_winner(&member.email_key).await?;
                self.reconcile(winner, member.address).await
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn reconcile(
        &self,
        existing: Member,
        address: Option<Address>,
    ) -> Result<RegistrationResponse, Error> {
        match address {
            Some(address) if existing.awaits_address() => self.upgrade(existing, address).await,
            _ => {
                info!(member_id = %existing.member_id, status = %existing.status, "member unchanged");
                Ok(respond(existing.member_id, existing.status))
            }
        }
    }

    async fn upgrade(
        &self,
        existing: Member,
        address: Address,
    ) -> Result<RegistrationResponse, Error> {
        let upgrade = AddressUpgrade::new(address, self.clock.utc());
        let outcome = self
            .repo
            .update_partial(&existing.member_id, &upgrade)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            PartialUpdateOutcome::Applied => {
                info!(member_id = %existing.member_id, "member upgraded");
                Ok(respond(existing.member_id, upgrade.status))
            }
            PartialUpdateOutcome::Stale => {
                let current = self.find_winner(&existing.email_key).await?;
                info!(member_id = %current.member_id, status = %current.status, "member unchanged");
                Ok(respond(current.member_id, current.status))
            }
        }
    }
}

#[async_trait]
impl<R> MemberRegistrationCommand for MemberRegistrationService<R>
where
    R: MemberRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationResponse, Error> {
        let signup = Signup::try_from_request(request)?;
        match self.find(&signup.email_key).await? {
            None => self.create(signup).await,
            Some(existing) => self.reconcile(existing, signup.address).await,
        }
    }
}

#[async_trait]
impl<R> EmailAvailabilityQuery for MemberRegistrationService<R>
where
    R: MemberRepository,
{
    async fn check(&self, email: &str) -> Result<EmailAvailability, Error> {
        let email_key = EmailKey::new(email).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "email", "code": "missing_email" }))
        })?;
        if !is_plausible(email) {
            return Err(Error::invalid_request("email is not a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" })));
        }

        let available = self.find(&email_key).await?.is_none();
        Ok(EmailAvailability {
            email_key,
            available,
        })
    }
}
