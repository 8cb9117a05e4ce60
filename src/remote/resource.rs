//! REST resource backend.

use std::marker::PhantomData;

use reqwest::Method;

use crate::domain::{Entity, RecordId, Result};
use crate::remote::client::ApiClient;
use crate::storage::{ListQuery, RecordBackend};

/// A REST collection such as `/doctors/`, used as a [`RecordBackend`].
///
/// | operation | request                    |
/// |-----------|----------------------------|
/// | list      | `GET /{resource}/?filters` |
/// | get       | `GET /{resource}/{id}/`    |
/// | create    | `POST /{resource}/`        |
/// | update    | `PUT /{resource}/{id}/`    |
/// | delete    | `DELETE /{resource}/{id}/` |
pub struct HttpResource<E> {
    client: ApiClient,
    resource: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpResource<E> {
    /// Resource for `E`, named after the entity kind's plural.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            resource: E::KIND.plural(),
            _entity: PhantomData,
        }
    }

    #[must_use]
    pub fn collection_url(&self) -> String {
        self.client.url(&[self.resource])
    }

    #[must_use]
    pub fn item_url(&self, id: &RecordId) -> String {
        self.client.url(&[self.resource, id.as_str()])
    }
}

impl<E: Entity> RecordBackend<E> for HttpResource<E> {
    fn list(&self, query: &ListQuery) -> Result<Vec<E>> {
        let _span = tracing::debug_span!("remote_list", resource = self.resource).entered();
        let records: Vec<E> = self.client.get(&self.collection_url(), query.params())?;
        tracing::debug!(count = records.len(), "fetched records");
        Ok(records)
    }

    fn get(&self, id: &RecordId) -> Result<E> {
        let _span = tracing::debug_span!("remote_get", resource = self.resource, id = %id).entered();
        self.client.get(&self.item_url(id), &[])
    }

    fn create(&mut self, draft: &E) -> Result<E> {
        let _span = tracing::debug_span!("remote_create", resource = self.resource).entered();
        self.client
            .send_json(Method::POST, &self.collection_url(), draft)
    }

    fn update(&mut self, id: &RecordId, draft: &E) -> Result<E> {
        let _span =
            tracing::debug_span!("remote_update", resource = self.resource, id = %id).entered();
        self.client.send_json(Method::PUT, &self.item_url(id), draft)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let _span =
            tracing::debug_span!("remote_delete", resource = self.resource, id = %id).entered();
        self.client.delete(&self.item_url(id))
    }
}
