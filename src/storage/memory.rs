//! In-memory record backend.
//!
//! Backs screens that run without a server. Records live in a `Vec` in insertion
//! order and new ids come from a monotonic counter, so an id is never reused
//! within one backend even after deletes.
//!
//! Fixtures can be loaded from a JSON seed file. Nothing is written back: this
//! backend is local mock state, not a persistence engine.

use crate::domain::{
    Appointment, DashboardError, Doctor, Entity, Patient, RecordId, Result,
};
use crate::storage::backend::{ListQuery, RecordBackend};
use serde::Deserialize;
use std::path::Path;

/// In-memory backend for one entity kind.
#[derive(Debug, Clone)]
pub struct MemoryBackend<E> {
    records: Vec<E>,
    /// `None` once the counter has handed out `u64::MAX`.
    next_id: Option<u64>,
}

impl<E: Entity> MemoryBackend<E> {
    /// Creates a backend holding `records`.
    ///
    /// Records without an id are assigned one. The id counter starts past the
    /// largest numeric id already present.
    #[must_use]
    pub fn new(records: Vec<E>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id()?.as_str().parse::<u64>().ok())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        let mut backend = Self {
            records: Vec::with_capacity(records.len()),
            next_id,
        };
        for mut record in records {
            if record.id().is_none() {
                match backend.allocate_id() {
                    Ok(id) => record.set_id(Some(id)),
                    Err(e) => tracing::warn!(error = %e, "seed record left without id"),
                }
            }
            backend.records.push(record);
        }

        tracing::debug!(
            kind = %E::KIND,
            count = backend.records.len(),
            next_id = ?backend.next_id,
            "memory backend initialized"
        );
        backend
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn allocate_id(&mut self) -> Result<RecordId> {
        let next = self.next_id.ok_or_else(|| {
            DashboardError::Config(format!("{} id counter exhausted", E::KIND))
        })?;
        self.next_id = next.checked_add(1);
        Ok(RecordId::new(next.to_string()))
    }

    fn position(&self, id: &RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id() == Some(id))
            .ok_or_else(|| DashboardError::NotFound {
                kind: E::KIND,
                id: id.clone(),
            })
    }
}

impl<E: Entity> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Entity> RecordBackend<E> for MemoryBackend<E> {
    fn list(&self, query: &ListQuery) -> Result<Vec<E>> {
        let _span = tracing::debug_span!("memory_list", kind = %E::KIND).entered();

        let records: Vec<E> = self
            .records
            .iter()
            .filter(|record| {
                query
                    .params()
                    .iter()
                    .all(|(key, value)| record.matches_param(key, value))
            })
            .cloned()
            .collect();

        tracing::debug!(count = records.len(), "listed records");
        Ok(records)
    }

    fn get(&self, id: &RecordId) -> Result<E> {
        let index = self.position(id)?;
        Ok(self.records[index].clone())
    }

    fn create(&mut self, draft: &E) -> Result<E> {
        let _span = tracing::debug_span!("memory_create", kind = %E::KIND).entered();

        let mut record = draft.clone();
        let id = self.allocate_id()?;
        tracing::debug!(id = %id, "assigned id");
        record.set_id(Some(id));
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &RecordId, draft: &E) -> Result<E> {
        let _span = tracing::debug_span!("memory_update", kind = %E::KIND, id = %id).entered();

        let index = self.position(id)?;
        let mut record = draft.clone();
        record.set_id(Some(id.clone()));
        self.records[index] = record.clone();
        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let _span = tracing::debug_span!("memory_delete", kind = %E::KIND, id = %id).entered();

        let index = self.position(id)?;
        self.records.remove(index);
        Ok(())
    }
}

/// Fixture document for the in-memory backends.
///
/// # File Format
///
/// ```json
/// {
///   "doctors": [{ "id": "1", "name": "BS. Nguyễn Văn A", "specialty": "Tim mạch" }],
///   "patients": [],
///   "appointments": []
/// }
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
}

impl SeedFile {
    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading seed file");

        let contents = std::fs::read_to_string(path)?;
        let seed: Self = serde_json::from_str(&contents)
            .map_err(|e| DashboardError::Json(format!("failed to parse seed file: {e}")))?;

        tracing::debug!(
            doctors = seed.doctors.len(),
            patients = seed.patients.len(),
            appointments = seed.appointments.len(),
            "loaded seed file"
        );
        Ok(seed)
    }
}
