//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// One row per registered member.
    ///
    /// `email_key` carries a UNIQUE constraint; inserts rely on it to reject
    /// concurrent duplicates.
    members (member_id) {
        /// Primary key: UUIDv7.
        member_id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        /// Email exactly as submitted.
        email -> Text,
        /// Trimmed, lowercased email; unique.
        email_key -> Text,
        /// Provider-aware canonical email, informational.
        email_canonical -> Text,
        tier -> Text,
        /// Structured address; NULL until one is supplied.
        address -> Nullable<Jsonb>,
        address_text -> Nullable<Text>,
        /// `pending-address` or `active`.
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
