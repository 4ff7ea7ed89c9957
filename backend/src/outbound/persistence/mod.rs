//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `MemberRepository` port over `diesel-async` with a `bb8`
//! connection pool. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private; only the repository, the pool and the
//! migration runner are exported.
//!
//! # Example
//!
//! ```no_run
//! use members_api::outbound::persistence::{DbPool, DieselMemberRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/members")).await?;
//! let repo = DieselMemberRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_member_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_member_repository::DieselMemberRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
