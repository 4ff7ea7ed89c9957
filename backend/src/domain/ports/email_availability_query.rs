//! Driving port for the pre-submit email availability check.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{EmailKey, Error};

/// Whether an email key is already registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAvailability {
    /// Dedupe key the lookup used.
    pub email_key: EmailKey,
    /// `true` when no member holds the key.
    pub available: bool,
}

/// Driving port for availability lookups.
///
/// Advisory only: registration stays idempotent whatever this reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailAvailabilityQuery: Send + Sync {
    /// Look up the dedupe key derived from `email`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for blank or implausible input and
    /// an internal error when storage fails.
    async fn check(&self, email: &str) -> Result<EmailAvailability, Error>;
}

/// Fixture implementation reporting every plausible email as available.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailAvailabilityQuery;

#[async_trait]
impl EmailAvailabilityQuery for FixtureEmailAvailabilityQuery {
    async fn check(&self, email: &str) -> Result<EmailAvailability, Error> {
        let email_key =
            EmailKey::new(email).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(EmailAvailability {
            email_key,
            available: true,
        })
    }
}
