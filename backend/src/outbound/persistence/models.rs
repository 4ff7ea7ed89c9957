//! Diesel row types for the `members` table.
//!
//! These stay internal to the persistence adapter; conversion to and from
//! domain types happens in the repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::members;

/// Row read from `members`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub member_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_key: String,
    pub email_canonical: String,
    pub tier: String,
    pub address: Option<Value>,
    pub address_text: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a new member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow<'a> {
    pub member_id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub email_key: &'a str,
    pub email_canonical: &'a str,
    pub tier: &'a str,
    pub address: Option<Value>,
    pub address_text: Option<&'a str>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a pending member acquires an address.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = members, treat_none_as_null = true)]
pub(crate) struct MemberAddressUpdate<'a> {
    pub address: Value,
    pub address_text: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
