//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL via Diesel, used when a database URL is
//!   configured.
//! - **memory**: process-local store with the same uniqueness guarantees.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
