//! The entity abstraction shared by doctors, patients and appointments.
//!
//! Every management screen works on a flat record type implementing [`Entity`].
//! The trait carries just what the generic core needs: identity, the searchable
//! text fields, the required-field check and a collection summary.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identity of a persisted record.
///
/// Ids are opaque tokens. The REST backend may send them as JSON strings or
/// integers; both decode into the same textual form. Ids always serialize as
/// strings.
///
/// # Examples
///
/// ```
/// use healthdesk::domain::RecordId;
///
/// let from_int: RecordId = serde_json::from_str("42").unwrap();
/// let from_str: RecordId = serde_json::from_str("\"42\"").unwrap();
/// assert_eq!(from_int, from_str);
/// assert_eq!(from_int.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// The three record kinds managed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Doctor,
    Patient,
    Appointment,
}

impl EntityKind {
    /// Singular, lower-case label used in log fields and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Appointment => "appointment",
        }
    }

    /// Plural label, also the REST resource segment (`/doctors/`).
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Doctor => "doctors",
            Self::Patient => "patients",
            Self::Appointment => "appointments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A flat record managed by a screen.
///
/// The same struct doubles as the draft: a draft is simply a record whose
/// [`id`](Entity::id) is `None`. Serialization omits an absent id, so a draft
/// serializes to exactly the create payload the REST backend expects.
pub trait Entity: Clone + fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned {
    /// Which kind of record this is.
    const KIND: EntityKind;

    /// Aggregate figures shown alongside the list.
    type Summary: fmt::Debug + Clone + PartialEq + Default;

    fn id(&self) -> Option<&RecordId>;

    fn set_id(&mut self, id: Option<RecordId>);

    /// Text fields the search box matches against, in display order.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Wire names of the required fields that are currently blank.
    ///
    /// An empty vector means the record may be submitted.
    fn missing_required_fields(&self) -> Vec<&'static str>;

    /// Short human label for logs and notifications.
    fn display_name(&self) -> &str;

    fn summarize(records: &[Self]) -> Self::Summary;

    /// Whether the record passes a list filter parameter such as `status`.
    ///
    /// Used by backends that filter locally. Unknown keys match everything.
    fn matches_param(&self, _key: &str, _value: &str) -> bool {
        true
    }

    /// Returns a copy with the identity removed.
    #[must_use]
    fn into_draft(mut self) -> Self {
        self.set_id(None);
        self
    }
}
