//! Create/edit session for a single record.
//!
//! A [`FormSession`] owns a working copy of the record that is independent of
//! the store until it is submitted. Submission validates required fields
//! first; the store is only called for a complete draft.
//!
//! # State Machine
//!
//! ```text
//! Editing ──submit──▶ Submitting ──ok──▶ Saved
//!    ▲                    │
//!    └──────backend err───┘
//! Editing ──cancel──▶ Cancelled
//! ```
//!
//! `Saved` and `Cancelled` are terminal: edits, submissions and cancellation
//! all fail with [`DashboardError::SessionClosed`].

use crate::domain::{Appointment, DashboardError, Doctor, Entity, RecordId, Result};
use crate::form::directory::DoctorDirectory;
use crate::storage::RecordStore;

/// Whether the session creates a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Saved,
    Cancelled,
}

impl FormState {
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Saved | Self::Cancelled)
    }
}

#[derive(Debug, Clone)]
pub struct FormSession<E: Entity> {
    mode: FormMode,
    draft: E,
    state: FormState,
    last_error: Option<String>,
}

impl<E: Entity> FormSession<E> {
    /// Starts a create session from `initial`. Any id on it is dropped.
    #[must_use]
    pub fn create(initial: E) -> Self {
        tracing::debug!(kind = %E::KIND, "opened create form");
        Self {
            mode: FormMode::Create,
            draft: initial.into_draft(),
            state: FormState::Editing,
            last_error: None,
        }
    }

    /// Starts an edit session on a copy of `record`.
    ///
    /// A record without an id opens a create session instead.
    #[must_use]
    pub fn edit(record: &E) -> Self {
        let Some(id) = record.id().cloned() else {
            return Self::create(record.clone());
        };
        tracing::debug!(kind = %E::KIND, id = %id, "opened edit form");
        Self {
            mode: FormMode::Edit(id),
            draft: record.clone().into_draft(),
            state: FormState::Editing,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    #[must_use]
    pub const fn draft(&self) -> &E {
        &self.draft
    }

    /// Message of the most recent failed submission, cleared on success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mutable access to the working copy.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` once the session is saved or cancelled.
    pub fn draft_mut(&mut self) -> Result<&mut E> {
        self.ensure_open()?;
        Ok(&mut self.draft)
    }

    /// Validates the draft and hands it to `store`.
    ///
    /// On a backend failure the session goes back to `Editing` with the draft
    /// intact, so the user can retry.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session is saved or cancelled
    /// - `Validation` if required fields are blank; the store is not called
    /// - any error the store returns
    pub fn submit(&mut self, store: &mut RecordStore<E>) -> Result<E> {
        let _span = tracing::debug_span!("form_submit", kind = %E::KIND, mode = ?self.mode)
            .entered();
        self.ensure_open()?;

        let missing = self.draft.missing_required_fields();
        if !missing.is_empty() {
            tracing::debug!(fields = ?missing, "draft incomplete");
            let error = DashboardError::Validation { fields: missing };
            self.last_error = Some(error.to_string());
            return Err(error);
        }

        self.state = FormState::Submitting;
        let result = match &self.mode {
            FormMode::Create => store.create(&self.draft),
            FormMode::Edit(id) => store.update(id, &self.draft),
        };

        match result {
            Ok(saved) => {
                self.state = FormState::Saved;
                self.last_error = None;
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(kind = %E::KIND, error = %e, "submission failed");
                self.state = FormState::Editing;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Abandons the session without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session is already saved or cancelled.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_open()?;
        tracing::debug!(kind = %E::KIND, "form cancelled");
        self.state = FormState::Cancelled;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state.is_closed() {
            return Err(DashboardError::SessionClosed);
        }
        Ok(())
    }
}

impl FormSession<Appointment> {
    /// Picks the appointment's doctor and derives its specialty.
    ///
    /// An unknown doctor leaves the specialty empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` once the session is saved or cancelled.
    pub fn select_doctor(&mut self, name: &str, directory: &DoctorDirectory) -> Result<()> {
        let draft = self.draft_mut()?;
        draft.doctor_name = name.to_string();
        draft.specialty = directory.specialty_of(name).unwrap_or_default().to_string();
        tracing::debug!(doctor = %name, specialty = %draft.specialty, "doctor selected");
        Ok(())
    }
}

impl FormSession<Doctor> {
    /// Adds or removes an availability slot on the draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` once the session is saved or cancelled.
    pub fn toggle_availability(&mut self, slot: &str) -> Result<()> {
        self.draft_mut()?.toggle_availability(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed, AppointmentStatus, Patient, Specialty};
    use crate::storage::testing::RecordingBackend;
    use crate::storage::{MemoryBackend, RefreshPolicy};
    use chrono::NaiveDate;

    fn complete_appointment() -> Appointment {
        Appointment {
            patient_name: "Nguyễn Thị C".into(),
            patient_phone: "0123456789".into(),
            doctor_name: "BS. Trần Thị B".into(),
            specialty: "Nhi khoa".into(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            appointment_time: "09:30".into(),
            reason: "Khám định kỳ".into(),
            ..Appointment::default()
        }
    }

    #[test]
    fn selecting_doctor_sets_specialty() {
        let mut session = FormSession::create(Appointment::default());
        session
            .select_doctor("BS. Nguyễn Văn A", &DoctorDirectory::default())
            .unwrap();
        assert_eq!(session.draft().doctor_name, "BS. Nguyễn Văn A");
        assert_eq!(session.draft().specialty, "Tim mạch");

        session.select_doctor("BS. Vô Danh", &DoctorDirectory::default()).unwrap();
        assert_eq!(session.draft().specialty, "");
    }

    #[test]
    fn blank_reason_is_rejected_without_backend_call() {
        let (backend, log) = RecordingBackend::<Appointment>::new(Vec::new());
        let mut store = RecordStore::new(backend, RefreshPolicy::Reload);

        let mut draft = complete_appointment();
        draft.reason = "   ".into();
        let mut session = FormSession::create(draft);

        let err = session.submit(&mut store).unwrap_err();
        assert!(matches!(err, DashboardError::Validation { ref fields } if fields == &vec!["reason"]));
        assert_eq!(session.state(), FormState::Editing);
        assert!(session.last_error().is_some());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn create_session_saves_and_closes() {
        let mut store = RecordStore::new(MemoryBackend::empty(), RefreshPolicy::Reload);
        let mut session = FormSession::create(complete_appointment());

        let saved = session.submit(&mut store).unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.status, AppointmentStatus::Scheduled);
        assert_eq!(session.state(), FormState::Saved);
        assert_eq!(store.list().len(), 1);

        assert!(matches!(session.draft_mut(), Err(DashboardError::SessionClosed)));
        assert!(matches!(
            session.submit(&mut store),
            Err(DashboardError::SessionClosed)
        ));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn edit_session_replaces_record() {
        let mut store = RecordStore::new(
            MemoryBackend::new(seed::sample_patients()),
            RefreshPolicy::Patch,
        );
        store.reload().unwrap();
        let original = store.list()[1].clone();

        let mut session = FormSession::edit(&original);
        assert_eq!(session.mode(), &FormMode::Edit(RecordId::new("2")));
        assert!(session.draft().id.is_none());
        session.draft_mut().unwrap().address = "789 Đường MNO".into();

        assert_eq!(store.list()[1].address, original.address);
        session.submit(&mut store).unwrap();
        assert_eq!(store.list()[1].address, "789 Đường MNO");
        assert_eq!(store.list()[1].id, original.id);
    }

    #[test]
    fn backend_failure_returns_to_editing_with_draft() {
        let (backend, log) = RecordingBackend::<Patient>::new(Vec::new());
        let mut store = RecordStore::new(backend, RefreshPolicy::Reload);
        let mut draft = seed::sample_patients().remove(0);
        draft.id = None;
        let mut session = FormSession::create(draft.clone());

        log.fail_next("create");
        let err = session.submit(&mut store).unwrap_err();
        assert!(matches!(err, DashboardError::Remote { status: Some(500), .. }));
        assert_eq!(session.state(), FormState::Editing);
        assert_eq!(session.draft(), &draft);
        assert!(store.list().is_empty());

        session.submit(&mut store).unwrap();
        assert_eq!(session.state(), FormState::Saved);
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn cancelled_session_rejects_everything() {
        let mut session = FormSession::create(Doctor::default());
        session.toggle_availability("08:00-10:00").unwrap();
        session.cancel().unwrap();

        assert_eq!(session.state(), FormState::Cancelled);
        assert!(matches!(
            session.toggle_availability("10:00-12:00"),
            Err(DashboardError::SessionClosed)
        ));
        assert!(matches!(session.cancel(), Err(DashboardError::SessionClosed)));
    }

    #[test]
    fn doctor_availability_toggles() {
        let mut session = FormSession::create(Doctor {
            name: "BS. Lê Văn C".into(),
            specialty: Some(Specialty::Dermatology),
            ..Doctor::default()
        });
        session.toggle_availability("14:00-16:00").unwrap();
        session.toggle_availability("18:00-20:00").unwrap();
        session.toggle_availability("14:00-16:00").unwrap();

        let slots: Vec<_> = session.draft().availability.iter().cloned().collect();
        assert_eq!(slots, vec!["18:00-20:00".to_string()]);
    }
}
