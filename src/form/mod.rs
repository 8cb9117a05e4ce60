//! Form sessions for creating and editing records.
//!
//! - [`session`]: the per-record state machine and submission
//! - [`directory`]: doctor lookup for the appointment specialty rule

pub mod directory;
pub mod session;

pub use directory::{DoctorChoice, DoctorDirectory};
pub use session::{FormMode, FormSession, FormState};
