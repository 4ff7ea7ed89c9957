//! PostgreSQL-backed `MemberRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `email_key` is enforced by the table's UNIQUE constraint.
//! Inserts use `ON CONFLICT (email_key) DO NOTHING` and report a duplicate
//! when no row was written; address upgrades filter on `address IS NULL` so
//! a concurrent upgrade cannot be overwritten.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{MemberRepository, MemberRepositoryError, PartialUpdateOutcome};
use crate::domain::{Address, AddressUpgrade, EmailKey, Member, MemberId, MemberStatus};

use super::models::{MemberAddressUpdate, MemberRow, NewMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::members;

/// Diesel-backed implementation of the `MemberRepository` port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MemberRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MemberRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> MemberRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            MemberRepositoryError::duplicate_email_key()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MemberRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => MemberRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => MemberRepositoryError::query("database query error"),
        DieselError::DeserializationError(_) => {
            MemberRepositoryError::query("failed to decode member row")
        }
        _ => MemberRepositoryError::query("database error"),
    }
}

fn row_to_member(row: MemberRow) -> Result<Member, MemberRepositoryError> {
    let invalid = |field: &str, reason: String| {
        MemberRepositoryError::query(format!(
            "stored member {} has invalid {field}: {reason}",
            row.member_id
        ))
    };

    let email_key =
        EmailKey::new(&row.email_key).map_err(|err| invalid("email_key", err.to_string()))?;
    let status = row
        .status
        .parse::<MemberStatus>()
        .map_err(|err| invalid("status", err.to_string()))?;
    let address = row
        .address
        .clone()
        .map(serde_json::from_value::<Address>)
        .transpose()
        .map_err(|err| invalid("address", err.to_string()))?;

    Ok(Member {
        member_id: MemberId::from_uuid(row.member_id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        email_key,
        email_canonical: row.email_canonical,
        tier: row.tier,
        address,
        address_text: row.address_text,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn member_to_row(member: &Member) -> NewMemberRow<'_> {
    NewMemberRow {
        member_id: *member.member_id.as_uuid(),
        first_name: &member.first_name,
        last_name: &member.last_name,
        email: &member.email,
        email_key: member.email_key.as_ref(),
        email_canonical: &member.email_canonical,
        tier: &member.tier,
        address: member.address.clone().map(serde_json::Value::from),
        address_text: member.address_text.as_deref(),
        status: member.status.as_str(),
        created_at: member.created_at,
        updated_at: member.updated_at,
    }
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn find_by_email_key(
        &self,
        email_key: &EmailKey,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MemberRow> = members::table
            .filter(members::email_key.eq(email_key.as_ref()))
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_member).transpose()
    }

    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(members::table)
            .values(&member_to_row(member))
            .on_conflict(members::email_key)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if inserted == 0 {
            return Err(MemberRepositoryError::duplicate_email_key());
        }
        Ok(())
    }

    async fn update_partial(
        &self,
        member_id: &MemberId,
        upgrade: &AddressUpgrade,
    ) -> Result<PartialUpdateOutcome, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = MemberAddressUpdate {
            address: serde_json::Value::from(upgrade.address.clone()),
            address_text: upgrade.address_text.as_deref(),
            status: upgrade.status.as_str(),
            updated_at: upgrade.updated_at,
        };

        let updated = diesel::update(members::table)
            .filter(
                members::member_id
                    .eq(member_id.as_uuid())
                    .and(members::address.is_null()),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(if updated == 0 {
            PartialUpdateOutcome::Stale
        } else {
            PartialUpdateOutcome::Applied
        })
    }
}
