//! Storage layer: where each screen's records live.
//!
//! A [`RecordStore`] holds the locally known collection for one entity kind and
//! delegates every operation to a [`RecordBackend`]. Backends are either the
//! in-memory [`MemoryBackend`] or the REST adapter in [`crate::remote`].
//!
//! # Modules
//!
//! - `backend`: backend trait and list query parameters
//! - `memory`: in-memory backend and JSON seed fixtures
//! - `store`: the record store and its refresh policy

pub mod backend;
pub mod memory;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ListQuery, RecordBackend};
pub use memory::{MemoryBackend, SeedFile};
pub use store::{RecordStore, RefreshPolicy};
