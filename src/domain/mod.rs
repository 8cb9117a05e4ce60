//! Domain layer for the dashboard.
//!
//! This module contains the record types and the error model, independent of
//! how records are stored or transported.
//!
//! # Organization
//!
//! - [`entity`]: the [`Entity`] trait, record ids and entity kinds
//! - [`doctor`], [`patient`], [`appointment`]: the three record kinds
//! - [`error`]: error types and result aliases
//! - [`seed`]: sample records for the in-memory backend
//!
//! # Examples
//!
//! ```
//! use healthdesk::domain::{Appointment, Entity};
//!
//! let draft = Appointment::default();
//! assert!(draft.id().is_none());
//! assert!(draft.missing_required_fields().contains(&"reason"));
//! ```

#[macro_use]
pub(crate) mod fields;

pub mod appointment;
pub mod doctor;
pub mod entity;
pub mod error;
pub mod patient;
pub mod seed;

pub use appointment::{Appointment, AppointmentStatus, AppointmentSummary, APPOINTMENT_SLOTS};
pub use doctor::{Doctor, DoctorSummary, Specialty, AVAILABILITY_SLOTS};
pub use entity::{Entity, EntityKind, RecordId};
pub use error::{DashboardError, Result};
pub use patient::{BloodType, Gender, Patient, PatientSummary};
