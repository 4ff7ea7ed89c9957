//! In-process member store.
//!
//! Honours the same contract as the PostgreSQL adapter: one record per email
//! key, and address upgrades only land on records still lacking one. Each
//! operation holds a single lock, so checks and writes are atomic. Data lives
//! for the life of the process; the server falls back to this store when no
//! database is configured.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{MemberRepository, MemberRepositoryError, PartialUpdateOutcome};
use crate::domain::{AddressUpgrade, EmailKey, Member, MemberId};

/// Member repository backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<HashMap<EmailKey, Member>>,
}

impl InMemoryMemberRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored members.
    ///
    /// # Errors
    ///
    /// Fails when the lock was poisoned by a panicking writer.
    pub fn len(&self) -> Result<usize, MemberRepositoryError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no members.
    ///
    /// # Errors
    ///
    /// Fails when the lock was poisoned by a panicking writer.
    pub fn is_empty(&self) -> Result<bool, MemberRepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<EmailKey, Member>>, MemberRepositoryError> {
        self.members
            .lock()
            .map_err(|_| MemberRepositoryError::query("member store lock poisoned"))
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_email_key(
        &self,
        email_key: &EmailKey,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        Ok(self.lock()?.get(email_key).cloned())
    }

    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError> {
        let mut members = self.lock()?;
        if members.contains_key(&member.email_key) {
            return Err(MemberRepositoryError::duplicate_email_key());
        }
        members.insert(member.email_key.clone(), member.clone());
        Ok(())
    }

    async fn update_partial(
        &self,
        member_id: &MemberId,
        upgrade: &AddressUpgrade,
    ) -> Result<PartialUpdateOutcome, MemberRepositoryError> {
        let mut members = self.lock()?;
        let pending = members
            .values_mut()
            .find(|member| member.member_id == *member_id && member.awaits_address());
        Ok(match pending {
            Some(member) => {
                upgrade.apply_to(member);
                PartialUpdateOutcome::Applied
            }
            None => PartialUpdateOutcome::Stale,
        })
    }
}
