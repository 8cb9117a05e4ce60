//! Error types for the dashboard core.
//!
//! This module defines the centralized error type [`DashboardError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Every failure is
//! scoped to the single operation that produced it; none of them is fatal to the
//! process.

use thiserror::Error;

use super::entity::{EntityKind, RecordId};

/// The main error type for dashboard operations.
///
/// The variants map onto the three failure families a screen can observe:
/// local validation, remote failures and missing records. The remaining variants
/// cover configuration and file loading.
///
/// # Examples
///
/// ```
/// use healthdesk::DashboardError;
///
/// let err = DashboardError::Validation { fields: vec!["reason"] };
/// assert_eq!(err.to_string(), "Missing required fields: reason");
///
/// let err = DashboardError::Remote { status: Some(404), status_text: "Not Found".into() };
/// assert_eq!(err.to_string(), "Remote error (404): Not Found");
/// ```
#[derive(Debug, Error)]
pub enum DashboardError {
    /// One or more required fields are blank.
    ///
    /// Raised by a form session before any backend call is made. The session
    /// stays open so the user can complete the draft.
    #[error("Missing required fields: {}", .fields.join(", "))]
    Validation {
        /// Wire names of the blank fields, in declaration order.
        fields: Vec<&'static str>,
    },

    /// The REST backend answered with a non-2xx status or could not be reached.
    ///
    /// `status` is `None` for transport failures (connection refused, DNS,
    /// undecodable body). No retry is attempted.
    #[error("Remote error ({}): {status_text}", describe_status(.status))]
    Remote {
        status: Option<u16>,
        status_text: String,
    },

    /// An operation referenced an id the local store does not hold.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },

    /// A saved or cancelled form session was edited or submitted again.
    #[error("Form session is closed")]
    SessionClosed,

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document (seed file, response body) could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),
}

impl DashboardError {
    /// Builds a remote error from an HTTP status code and its reason phrase.
    pub fn remote(status: u16, status_text: impl Into<String>) -> Self {
        Self::Remote {
            status: Some(status),
            status_text: status_text.into(),
        }
    }

    /// Returns `true` for errors caught locally before any backend call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn describe_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "network".to_string(), |code| code.to_string())
}

/// A specialized `Result` type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
