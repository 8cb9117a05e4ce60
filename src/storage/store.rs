//! Record store: the local view of one entity kind's collection.
//!
//! A [`RecordStore`] owns a backend and the most recently listed records. All
//! mutations go through the backend first; the local collection only changes
//! once the backend has accepted the change, and then according to the
//! configured [`RefreshPolicy`].

use crate::domain::fields::labeled_enum;
use crate::domain::{Entity, RecordId, Result};
use crate::storage::backend::{ListQuery, RecordBackend};

labeled_enum! {
    /// How the local collection catches up after a successful mutation.
    pub enum RefreshPolicy {
        /// Re-list the whole collection from the backend.
        Reload => "reload",
        /// Apply the record the backend returned to the local collection.
        Patch => "patch",
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::Reload
    }
}

enum Change<E> {
    Upserted(E),
    Removed(RecordId),
}

/// Local collection of one entity kind backed by a [`RecordBackend`].
///
/// # Examples
///
/// ```
/// use healthdesk::domain::{seed, Doctor, Entity};
/// use healthdesk::storage::{MemoryBackend, RecordStore, RefreshPolicy};
///
/// let mut store = RecordStore::new(
///     MemoryBackend::new(seed::sample_doctors()),
///     RefreshPolicy::Reload,
/// );
/// store.reload()?;
///
/// let mut draft = store.list()[0].clone().into_draft();
/// draft.name = "BS. Hoàng Văn E".into();
/// let created = store.create(&draft)?;
///
/// assert_eq!(store.list().len(), 3);
/// assert!(store.find(created.id().unwrap()).is_some());
/// # Ok::<(), healthdesk::DashboardError>(())
/// ```
pub struct RecordStore<E: Entity> {
    backend: Box<dyn RecordBackend<E>>,
    records: Vec<E>,
    policy: RefreshPolicy,
    query: ListQuery,
    loading: bool,
}

impl<E: Entity> RecordStore<E> {
    /// Creates an empty store. Nothing is fetched until [`reload`](Self::reload).
    pub fn new(backend: impl RecordBackend<E> + 'static, policy: RefreshPolicy) -> Self {
        Self::from_boxed(Box::new(backend), policy)
    }

    #[must_use]
    pub fn from_boxed(backend: Box<dyn RecordBackend<E>>, policy: RefreshPolicy) -> Self {
        Self {
            backend,
            records: Vec::new(),
            policy,
            query: ListQuery::new(),
            loading: true,
        }
    }

    /// Current records in backend order.
    #[must_use]
    pub fn list(&self) -> &[E] {
        &self.records
    }

    /// Looks up a record in the local collection without a backend call.
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&E> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// `true` while a backend call is in progress and before the first load.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// The filters used by the last successful reload.
    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Replaces the local collection with the backend's list, reusing the last
    /// query.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local collection is left unchanged.
    pub fn reload(&mut self) -> Result<&[E]> {
        let query = self.query.clone();
        self.reload_with(query)
    }

    /// Replaces the local collection with the records matching `query`.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local collection and the remembered
    /// query are left unchanged.
    pub fn reload_with(&mut self, query: ListQuery) -> Result<&[E]> {
        let _span = tracing::debug_span!("store_reload", kind = %E::KIND, params = ?query.params())
            .entered();

        let records = self.call(|backend| backend.list(&query))?;
        tracing::debug!(count = records.len(), "reloaded records");

        self.records = records;
        self.query = query;
        Ok(&self.records)
    }

    /// Fetches one record from the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the record is absent or unreachable.
    pub fn get(&mut self, id: &RecordId) -> Result<E> {
        let _span = tracing::debug_span!("store_get", kind = %E::KIND, id = %id).entered();
        self.call(|backend| backend.get(id))
    }

    /// Persists `draft` as a new record. Any id on the draft is discarded.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local collection is left unchanged.
    pub fn create(&mut self, draft: &E) -> Result<E> {
        let _span = tracing::debug_span!("store_create", kind = %E::KIND).entered();

        let draft = draft.clone().into_draft();
        let created = self.call(|backend| backend.create(&draft))?;
        tracing::info!(
            kind = %E::KIND,
            id = ?created.id(),
            name = %created.display_name(),
            "created record"
        );

        self.refresh(Change::Upserted(created.clone()));
        Ok(created)
    }

    /// Replaces the record with `id` by `draft`.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local collection is left unchanged.
    pub fn update(&mut self, id: &RecordId, draft: &E) -> Result<E> {
        let _span = tracing::debug_span!("store_update", kind = %E::KIND, id = %id).entered();

        let draft = draft.clone().into_draft();
        let updated = self.call(|backend| backend.update(id, &draft))?;
        tracing::info!(kind = %E::KIND, id = %id, "updated record");

        self.refresh(Change::Upserted(updated.clone()));
        Ok(updated)
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns the backend error, including for an id that was already deleted.
    pub fn delete(&mut self, id: &RecordId) -> Result<()> {
        let _span = tracing::debug_span!("store_delete", kind = %E::KIND, id = %id).entered();

        self.call(|backend| backend.delete(id))?;
        tracing::info!(kind = %E::KIND, id = %id, "deleted record");

        self.refresh(Change::Removed(id.clone()));
        Ok(())
    }

    fn call<T>(&mut self, op: impl FnOnce(&mut dyn RecordBackend<E>) -> Result<T>) -> Result<T> {
        self.loading = true;
        let result = op(self.backend.as_mut());
        self.loading = false;
        result
    }

    fn refresh(&mut self, change: Change<E>) {
        if self.policy == RefreshPolicy::Reload {
            match self.reload() {
                Ok(_) => return,
                Err(e) => {
                    tracing::warn!(
                        kind = %E::KIND,
                        error = %e,
                        "reload after mutation failed, patching locally"
                    );
                }
            }
        }
        self.apply(change);
    }

    fn apply(&mut self, change: Change<E>) {
        match change {
            Change::Upserted(record) => {
                let existing = self
                    .records
                    .iter()
                    .position(|current| current.id().is_some() && current.id() == record.id());
                match existing {
                    Some(index) => self.records[index] = record,
                    None => self.records.push(record),
                }
            }
            Change::Removed(id) => self.records.retain(|record| record.id() != Some(&id)),
        }
    }
}

impl<E: Entity> std::fmt::Debug for RecordStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &E::KIND)
            .field("records", &self.records.len())
            .field("policy", &self.policy)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}
