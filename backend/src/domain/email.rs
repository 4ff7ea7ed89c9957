//! Email normalisation.
//!
//! Two normal forms exist and must not be confused:
//!
//! - [`EmailKey`]: trimmed and lowercased. This is the dedupe key and the
//!   only form used for uniqueness.
//! - [`canonical_form`]: provider-aware folding (Gmail dots and
//!   sub-addressing). Stored for reporting only.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const GMAIL_DOMAIN: &str = "gmail.com";
const GMAIL_ALIAS_DOMAIN: &str = "googlemail.com";

/// Validation errors raised when deriving an [`EmailKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// The address was absent or blank after trimming.
    #[error("email is required")]
    Missing,
}

/// Case- and whitespace-insensitive dedupe key for an email address.
///
/// # Examples
/// ```
/// use members_api::domain::EmailKey;
///
/// let key = EmailKey::new("  Foo@Bar.com").expect("non-blank email");
/// assert_eq!(key.as_ref(), "foo@bar.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailKey(String);

impl EmailKey {
    /// Derive the key from user input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let key = dedupe_key(raw.as_ref());
        if key.is_empty() {
            return Err(EmailValidationError::Missing);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for EmailKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailKey> for String {
    fn from(value: EmailKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailKey {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trim surrounding whitespace and lowercase.
///
/// Blank input yields an empty string; callers decide whether that is an
/// error.
#[must_use]
pub fn dedupe_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Provider-aware canonical form used for analytics.
///
/// The address is lowercased, trimmed and split at the last `@`. An empty
/// local part or domain yields an empty string. `googlemail.com` folds to
/// `gmail.com`; for Gmail the local part loses everything from the first `+`
/// and every `.`. Other domains are returned as lowercased input.
///
/// # Examples
/// ```
/// use members_api::domain::canonical_form;
///
/// assert_eq!(canonical_form("a.b+promo@gmail.com"), "ab@gmail.com");
/// assert_eq!(canonical_form("a.b+x@googlemail.com"), "ab@gmail.com");
/// assert_eq!(canonical_form("a.b+c@work.io"), "a.b+c@work.io");
/// ```
#[must_use]
pub fn canonical_form(email: &str) -> String {
    let lowered = dedupe_key(email);
    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return String::new();
    };
    if local.is_empty() || domain.is_empty() {
        return String::new();
    }

    let domain = if domain == GMAIL_ALIAS_DOMAIN {
        GMAIL_DOMAIN
    } else {
        domain
    };
    if domain != GMAIL_DOMAIN {
        return format!("{local}@{domain}");
    }

    let base = local.split_once('+').map_or(local, |(head, _)| head);
    let folded: String = base.chars().filter(|c| *c != '.').collect();
    format!("{folded}@{domain}")
}

static PLAUSIBLE_EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn plausible_email_regex() -> &'static Regex {
    PLAUSIBLE_EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("plausible email regex failed to compile: {error}"))
    })
}

/// Loose shape check used by the availability lookup.
///
/// Requires one `@`, no whitespace and a dot in the domain. Registration does
/// not apply this rule.
#[must_use]
pub fn is_plausible(email: &str) -> bool {
    plausible_email_regex().is_match(email.trim())
}
