//! Record backend abstraction.
//!
//! This module defines the [`RecordBackend`] trait that abstracts over where a
//! screen's records live. The in-memory backend and the REST adapter both
//! implement it, so the [`RecordStore`](super::RecordStore) and everything above
//! it stay unaware of the transport.
//!
//! # Design Philosophy
//!
//! The trait mirrors the REST resource contract one method per verb, not a
//! generic ORM. Every method either fully succeeds or leaves the backend
//! unchanged.

use crate::domain::{Entity, RecordId, Result};

/// Optional list filters, sent as query-string parameters.
///
/// Parameters are only recorded when a value is present and non-blank, so an
/// unfiltered query produces a bare collection URL.
///
/// # Examples
///
/// ```
/// use healthdesk::storage::ListQuery;
/// use healthdesk::domain::AppointmentStatus;
///
/// let query = ListQuery::new()
///     .doctor(Some("BS. Trần Thị B"))
///     .status(None::<AppointmentStatus>);
/// assert_eq!(query.params(), &[("doctor", "BS. Trần Thị B".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(&'static str, String)>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value` when `value` is present and not blank.
    #[must_use]
    pub fn param(mut self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value.map(Into::into) {
            if !value.trim().is_empty() {
                self.params.push((key, value));
            }
        }
        self
    }

    /// Filters appointments by doctor name.
    #[must_use]
    pub fn doctor(self, name: Option<&str>) -> Self {
        self.param("doctor", name)
    }

    /// Filters appointments by status.
    #[must_use]
    pub fn status(self, status: Option<crate::domain::AppointmentStatus>) -> Self {
        self.param("status", status.map(|s| s.as_str()))
    }

    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Where a screen's records are kept.
///
/// # Implementations
///
/// - [`MemoryBackend`](super::MemoryBackend): local state with counter ids
/// - [`HttpResource`](crate::remote::HttpResource): a REST resource endpoint
///
/// # Examples
///
/// ```
/// use healthdesk::domain::{seed, Doctor};
/// use healthdesk::storage::{ListQuery, MemoryBackend, RecordBackend};
///
/// let backend = MemoryBackend::new(seed::sample_doctors());
/// let doctors: Vec<Doctor> = backend.list(&ListQuery::new())?;
/// assert_eq!(doctors.len(), 2);
/// # Ok::<(), healthdesk::DashboardError>(())
/// ```
pub trait RecordBackend<E: Entity> {
    /// Returns every record matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self, query: &ListQuery) -> Result<Vec<E>>;

    /// Returns the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (local) or `Remote` (server) when absent.
    fn get(&self, id: &RecordId) -> Result<E>;

    /// Persists a draft and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn create(&mut self, draft: &E) -> Result<E>;

    /// Replaces the record with `id` wholesale.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (local) or `Remote` (server) when absent.
    fn update(&mut self, id: &RecordId, draft: &E) -> Result<E>;

    /// Removes the record with `id`. Deleting twice fails the second time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (local) or `Remote` (server) when absent.
    fn delete(&mut self, id: &RecordId) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppointmentStatus;

    #[test]
    fn absent_and_blank_values_are_skipped() {
        let query = ListQuery::new()
            .doctor(Some("  "))
            .doctor(None)
            .status(Some(AppointmentStatus::Confirmed));
        assert_eq!(query.params(), &[("status", "confirmed".to_string())]);
    }

    #[test]
    fn default_query_is_empty() {
        assert!(ListQuery::new().is_empty());
    }
}
