//! REST adapter for the dashboard API.
//!
//! [`ApiClient`] wraps a blocking `reqwest` client and normalizes failures;
//! [`HttpResource`] exposes one REST collection as a
//! [`RecordBackend`](crate::storage::RecordBackend).

pub mod client;
pub mod resource;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use resource::HttpResource;
