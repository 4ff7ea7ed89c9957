//! Port for durable member storage.
//!
//! Uniqueness of the email key is the adapter's job: `insert` must fail with
//! [`MemberRepositoryError::DuplicateEmailKey`] instead of writing a second
//! record, and `update_partial` must only attach an address to a record that
//! still lacks one. Together these let the registration service resolve
//! concurrent signups without a transaction spanning lookup and write.

use async_trait::async_trait;

use crate::domain::{AddressUpgrade, EmailKey, Member, MemberId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "member repository query failed: {message}",
        /// Another record already holds the email key.
        DuplicateEmailKey =>
            "a member with this email key already exists",
    }
}

/// Result of a conditional partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialUpdateOutcome {
    /// The record was still awaiting an address and has been upgraded.
    Applied,
    /// Nothing was written: the record already had an address (or is gone).
    Stale,
}

/// Port for member storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Point lookup by dedupe key.
    async fn find_by_email_key(
        &self,
        email_key: &EmailKey,
    ) -> Result<Option<Member>, MemberRepositoryError>;

    /// Create a record for a fresh member id.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::DuplicateEmailKey`] when a record with
    /// the same email key already exists; nothing is written in that case.
    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError>;

    /// Merge `upgrade` into the record, provided it has no address yet.
    async fn update_partial(
        &self,
        member_id: &MemberId,
        upgrade: &AddressUpgrade,
    ) -> Result<PartialUpdateOutcome, MemberRepositoryError>;
}

/// Fixture implementation for testing without storage.
///
/// Lookups find nothing and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMemberRepository;

#[async_trait]
impl MemberRepository for FixtureMemberRepository {
    async fn find_by_email_key(
        &self,
        _email_key: &EmailKey,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _member: &Member) -> Result<(), MemberRepositoryError> {
        Ok(())
    }

    async fn update_partial(
        &self,
        _member_id: &MemberId,
        _upgrade: &AddressUpgrade,
    ) -> Result<PartialUpdateOutcome, MemberRepositoryError> {
        Ok(PartialUpdateOutcome::Applied)
    }
}
