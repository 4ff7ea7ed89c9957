//! Embedded PostgreSQL helpers for the Diesel adapter suites.
//!
//! Every test gets its own temporary database on a shared cluster, with the
//! crate's embedded migrations applied. Raw assertions go through `postgres`
//! so they do not share the pool under test.
//!
//! Environments that cannot start the cluster (no binaries, no network) skip
//! these tests with a `SKIP-TEST-CLUSTER` marker. Set `REQUIRE_TEST_CLUSTER=1`
//! to turn that skip into a failure.

use std::time::Duration;

use members_api::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => {
                return Err(format!("shared cluster: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Create a migrated temporary database on the shared cluster.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4()).as_str())
        .map_err(|error| format!("create database: {error:?}"))?;
    let url: String = database.url().into();
    run_pending_migrations(&url).map_err(|error| error.to_string())?;
    Ok(database)
}

fn require_test_cluster() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip, or fail under `REQUIRE_TEST_CLUSTER`, when setup did not succeed.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if require_test_cluster() {
        panic!("Test cluster setup failed: {reason}");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    )
}

/// Rows stored under `email_key`, read outside the repository.
pub fn count_members(url: &str, email_key: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|error| format_postgres_error(&error))?;
    let row = client
        .query_one(
            "SELECT COUNT(*) FROM members WHERE email_key = $1",
            &[&email_key],
        )
        .map_err(|error| format_postgres_error(&error))?;
    Ok(row.get(0))
}
