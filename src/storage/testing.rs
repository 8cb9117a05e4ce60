//! Test backend that records which operations were called.

use crate::domain::{DashboardError, Entity, RecordId, Result};
use crate::storage::backend::{ListQuery, RecordBackend};
use crate::storage::MemoryBackend;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct LogState {
    calls: Vec<&'static str>,
    fail_next: Vec<&'static str>,
}

/// Shared handle onto a [`RecordingBackend`]'s call log.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<LogState>>);

impl CallLog {
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.0.borrow().calls.clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().calls.clear();
    }

    /// Makes the next call of operation `op` fail with a remote 500.
    pub(crate) fn fail_next(&self, op: &'static str) {
        self.0.borrow_mut().fail_next.push(op);
    }

    fn record(&self, op: &'static str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push(op);
        if let Some(index) = state.fail_next.iter().position(|pending| *pending == op) {
            state.fail_next.remove(index);
            return Err(DashboardError::remote(500, "Internal Server Error"));
        }
        Ok(())
    }
}

/// Memory backend wrapper that logs every call.
pub(crate) struct RecordingBackend<E> {
    inner: MemoryBackend<E>,
    log: CallLog,
}

impl<E: Entity> RecordingBackend<E> {
    pub(crate) fn new(records: Vec<E>) -> (Self, CallLog) {
        let log = CallLog::default();
        let backend = Self {
            inner: MemoryBackend::new(records),
            log: log.clone(),
        };
        (backend, log)
    }
}

impl<E: Entity> RecordBackend<E> for RecordingBackend<E> {
    fn list(&self, query: &ListQuery) -> Result<Vec<E>> {
        self.log.record("list")?;
        self.inner.list(query)
    }

    fn get(&self, id: &RecordId) -> Result<E> {
        self.log.record("get")?;
        self.inner.get(id)
    }

    fn create(&mut self, draft: &E) -> Result<E> {
        self.log.record("create")?;
        self.inner.create(draft)
    }

    fn update(&mut self, id: &RecordId, draft: &E) -> Result<E> {
        self.log.record("update")?;
        self.inner.update(id, draft)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.log.record("delete")?;
        self.inner.delete(id)
    }
}
