//! Mailing address normalisation.
//!
//! Signup payloads carry an address in whatever shape the form produced:
//! nothing, a free-text line, or an object from an address picker. The shape
//! is resolved once here; everything downstream works with
//! `Option<Address>`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FORMATTED: &str = "formatted";
const STREET_ADDRESS: &str = "streetAddress";
const LOCATION: &str = "location";

/// Address payload as received at the boundary.
///
/// Absence is modelled by wrapping this in `Option`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    /// Single free-text line.
    Freeform(String),
    /// Object produced by an address picker.
    Structured(Map<String, Value>),
    /// Any other JSON value; always normalises to no address.
    Unsupported(Value),
}

impl AddressInput {
    /// Resolve the payload into a stored address, if it carries one.
    ///
    /// | Input | Result |
    /// |---|---|
    /// | blank string | `None` |
    /// | non-blank string | `{ "formatted": <trimmed> }` |
    /// | object with non-blank `formatted` or `streetAddress` | the object unchanged |
    /// | anything else | `None` |
    ///
    /// # Examples
    /// ```
    /// use members_api::domain::AddressInput;
    ///
    /// let address = AddressInput::Freeform(" 221B Baker St ".into())
    ///     .normalize()
    ///     .expect("non-blank line");
    /// assert_eq!(address.text(), Some("221B Baker St"));
    /// ```
    #[must_use]
    pub fn normalize(self) -> Option<Address> {
        match self {
            Self::Freeform(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let mut fields = Map::new();
                fields.insert(FORMATTED.to_owned(), Value::String(trimmed.to_owned()));
                Some(Address(fields))
            }
            Self::Structured(fields) => Address::from_fields(fields),
            Self::Unsupported(_) => None,
        }
    }
}

/// Normalise an optional address payload.
#[must_use]
pub fn normalize_address(input: Option<AddressInput>) -> Option<Address> {
    input.and_then(AddressInput::normalize)
}

/// Structured mailing address.
///
/// ## Invariants
/// - At least one of `formatted` or `streetAddress` is a non-blank string.
///
/// Extra picker fields (city, postal code, coordinates) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Address(Map<String, Value>);

/// Geographic coordinates attached to a picker address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

/// Raised when a stored object lacks both display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("address must carry a non-empty formatted or streetAddress field")]
pub struct AddressValidationError;

impl Address {
    fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        let usable = non_blank(&fields, FORMATTED).is_some()
            || non_blank(&fields, STREET_ADDRESS).is_some();
        usable.then_some(Self(fields))
    }

    /// Flattened display line: `formatted`, else `streetAddress`.
    ///
    /// The chosen field is returned exactly as stored; blank fields are
    /// skipped but nothing is trimmed.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        non_blank_raw(&self.0, FORMATTED).or_else(|| non_blank_raw(&self.0, STREET_ADDRESS))
    }

    /// Coordinates when the picker supplied numeric latitude and longitude.
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        let location = self.0.get(LOCATION)?.as_object()?;
        Some(GeoPoint {
            latitude: location.get("latitude")?.as_f64()?,
            longitude: location.get("longitude")?.as_f64()?,
        })
    }

    /// Raw fields as stored.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Address> for Map<String, Value> {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Object(value.0)
    }
}

impl TryFrom<Map<String, Value>> for Address {
    type Error = AddressValidationError;

    fn try_from(value: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_fields(value).ok_or(AddressValidationError)
    }
}

fn non_blank<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn non_blank_raw<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    non_blank(fields, key).and(fields.get(key).and_then(Value::as_str))
}
