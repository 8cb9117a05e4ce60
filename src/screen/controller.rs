//! Event handling for one management screen.
//!
//! A [`ScreenController`] ties a [`RecordStore`], the search term and at most
//! one open [`FormSession`] together. The presentation layer feeds it
//! [`ScreenEvent`]s and carries out the [`Action`]s it returns.
//!
//! # Event Flow
//!
//! ```text
//! ScreenEvent ──▶ handle_event ──▶ store / form mutations ──▶ Vec<Action>
//! ```
//!
//! Failures never escape as errors. Each one is reported as a notification
//! and leaves the previous state in place: a failed load keeps the old list,
//! a failed save keeps the form open with the draft intact.

use crate::domain::{DashboardError, Entity, RecordId};
use crate::form::{FormMode, FormSession};
use crate::screen::actions::{Action, Notification};
use crate::search;
use crate::storage::RecordStore;

/// Input to a screen controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// (Re)loads the collection from the backend.
    Load,
    /// Replaces the search term.
    SetSearchTerm(String),
    ClearSearch,
    /// Opens a blank create form.
    NewRecord,
    /// Opens an edit form on a copy of the record.
    EditRecord(RecordId),
    /// Submits the open form.
    SubmitForm,
    /// Closes the open form without saving.
    CancelForm,
    DeleteRecord(RecordId),
}

/// Orchestrates one entity kind's list, search and form.
#[derive(Debug)]
pub struct ScreenController<E: Entity> {
    store: RecordStore<E>,
    search_term: String,
    form: Option<FormSession<E>>,
}

impl<E: Entity> ScreenController<E> {
    #[must_use]
    pub fn new(store: RecordStore<E>) -> Self {
        Self {
            store,
            search_term: String::new(),
            form: None,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<E> {
        &mut self.store
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Records matching the current search term.
    #[must_use]
    pub fn visible(&self) -> Vec<&E> {
        search::filter(self.store.list(), &self.search_term)
    }

    /// Figures over the whole collection, ignoring the search term.
    #[must_use]
    pub fn summary(&self) -> E::Summary {
        E::summarize(self.store.list())
    }

    #[must_use]
    pub const fn form(&self) -> Option<&FormSession<E>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormSession<E>> {
        self.form.as_mut()
    }

    /// Processes an event and returns the actions to carry out.
    ///
    /// # Example
    ///
    /// ```
    /// use healthdesk::domain::{seed, Doctor};
    /// use healthdesk::screen::{Action, ScreenController, ScreenEvent};
    /// use healthdesk::storage::{MemoryBackend, RecordStore, RefreshPolicy};
    ///
    /// let store = RecordStore::new(MemoryBackend::new(seed::sample_doctors()), RefreshPolicy::Reload);
    /// let mut screen: ScreenController<Doctor> = ScreenController::new(store);
    ///
    /// assert!(screen.handle_event(ScreenEvent::Load).is_empty());
    /// screen.handle_event(ScreenEvent::SetSearchTerm("nhi".into()));
    /// assert_eq!(screen.visible().len(), 1);
    /// ```
    pub fn handle_event(&mut self, event: ScreenEvent) -> Vec<Action> {
        let _span = tracing::debug_span!("handle_event", kind = %E::KIND, event = ?event).entered();

        match event {
            ScreenEvent::Load => self.load(),
            ScreenEvent::SetSearchTerm(term) => {
                self.search_term = term;
                vec![]
            }
            ScreenEvent::ClearSearch => {
                self.search_term.clear();
                vec![]
            }
            ScreenEvent::NewRecord => {
                self.form = Some(FormSession::create(E::default()));
                vec![Action::OpenForm(FormMode::Create)]
            }
            ScreenEvent::EditRecord(id) => self.open_editor(&id),
            ScreenEvent::SubmitForm => self.submit(),
            ScreenEvent::CancelForm => self.cancel(),
            ScreenEvent::DeleteRecord(id) => self.delete(&id),
        }
    }

    fn load(&mut self) -> Vec<Action> {
        match self.store.reload() {
            Ok(records) => {
                tracing::debug!(count = records.len(), "screen loaded");
                vec![]
            }
            Err(e) => {
                tracing::error!(kind = %E::KIND, error = %e, "load failed");
                vec![Action::Notify(Notification::error(format!(
                    "Could not load {}",
                    E::KIND.plural()
                )))]
            }
        }
    }

    fn open_editor(&mut self, id: &RecordId) -> Vec<Action> {
        let Some(record) = self.store.find(id) else {
            tracing::warn!(kind = %E::KIND, id = %id, "edit requested for unknown record");
            return vec![Action::Notify(Notification::error(
                DashboardError::NotFound {
                    kind: E::KIND,
                    id: id.clone(),
                }
                .to_string(),
            ))];
        };

        self.form = Some(FormSession::edit(record));
        vec![Action::OpenForm(FormMode::Edit(id.clone()))]
    }

    fn submit(&mut self) -> Vec<Action> {
        let Some(form) = self.form.as_mut() else {
            tracing::debug!("submit with no open form");
            return vec![];
        };

        let creating = matches!(form.mode(), FormMode::Create);
        match form.submit(&mut self.store) {
            Ok(saved) => {
                self.form = None;
                let message = if creating {
                    format!("Added new {}: {}", E::KIND, saved.display_name())
                } else {
                    format!("Updated {}: {}", E::KIND, saved.display_name())
                };
                vec![
                    Action::CloseForm,
                    Action::Notify(Notification::success("Success", message)),
                ]
            }
            Err(e) if e.is_validation() => vec![Action::Notify(Notification::warning(
                "Incomplete form",
                e.to_string(),
            ))],
            Err(e) => {
                tracing::error!(kind = %E::KIND, error = %e, "save failed");
                vec![Action::Notify(Notification::error(format!(
                    "Could not save {}",
                    E::KIND
                )))]
            }
        }
    }

    fn cancel(&mut self) -> Vec<Action> {
        match self.form.take() {
            Some(mut form) => {
                if let Err(e) = form.cancel() {
                    tracing::debug!(error = %e, "form was already closed");
                }
                vec![Action::CloseForm]
            }
            None => vec![],
        }
    }

    fn delete(&mut self, id: &RecordId) -> Vec<Action> {
        match self.store.delete(id) {
            Ok(()) => vec![Action::Notify(Notification::success(
                "Deleted",
                format!("Removed {} {id}", E::KIND),
            ))],
            Err(e) => {
                tracing::error!(kind = %E::KIND, id = %id, error = %e, "delete failed");
                vec![Action::Notify(Notification::error(format!(
                    "Could not delete {}",
                    E::KIND
                )))]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed, Appointment, Doctor, Patient, Specialty};
    use crate::form::DoctorDirectory;
    use crate::screen::actions::Severity;
    use crate::storage::testing::{CallLog, RecordingBackend};
    use crate::storage::RefreshPolicy;
    use chrono::NaiveDate;

    fn patient_screen() -> (ScreenController<Patient>, CallLog) {
        let (backend, log) = RecordingBackend::new(seed::sample_patients());
        let mut screen = ScreenController::new(RecordStore::new(backend, RefreshPolicy::Reload));
        assert!(screen.handle_event(ScreenEvent::Load).is_empty());
        log.clear();
        (screen, log)
    }

    fn severity(actions: &[Action]) -> Option<Severity> {
        actions.iter().find_map(|action| match action {
            Action::Notify(notification) => Some(notification.severity),
            _ => None,
        })
    }

    #[test]
    fn search_term_narrows_visible_records() {
        let (mut screen, _) = patient_screen();
        screen.handle_event(ScreenEvent::SetSearchTerm("TRẦN".into()));
        assert_eq!(screen.visible().len(), 1);
        assert_eq!(screen.store().list().len(), 2);

        screen.handle_event(ScreenEvent::ClearSearch);
        assert_eq!(screen.visible().len(), 2);
        assert_eq!(screen.search_term(), "");
    }

    #[test]
    fn summary_covers_whole_collection() {
        let (mut screen, _) = patient_screen();
        screen.handle_event(ScreenEvent::SetSearchTerm("no match".into()));
        let summary = screen.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.with_allergies, 1);
    }

    #[test]
    fn failed_load_notifies_and_keeps_list() {
        let (mut screen, log) = patient_screen();
        log.fail_next("list");

        let actions = screen.handle_event(ScreenEvent::Load);
        assert_eq!(
            actions,
            vec![Action::Notify(Notification::error("Could not load patients"))]
        );
        assert_eq!(screen.store().list().len(), 2);
    }

    #[test]
    fn incomplete_form_warns_and_stays_open() {
        let (mut screen, log) = patient_screen();
        assert_eq!(
            screen.handle_event(ScreenEvent::NewRecord),
            vec![Action::OpenForm(FormMode::Create)]
        );
        screen.form_mut().unwrap().draft_mut().unwrap().name = "Lê Thị G".into();

        let actions = screen.handle_event(ScreenEvent::SubmitForm);
        assert_eq!(severity(&actions), Some(Severity::Warning));
        assert!(!actions.contains(&Action::CloseForm));
        assert!(screen.form().is_some());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn successful_create_closes_form_and_reloads() {
        let (mut screen, log) = patient_screen();
        screen.handle_event(ScreenEvent::NewRecord);
        {
            let draft = screen.form_mut().unwrap().draft_mut().unwrap();
            draft.name = "Lê Thị G".into();
            draft.phone = "0911222333".into();
            draft.date_of_birth = NaiveDate::from_ymd_opt(2001, 3, 9);
            draft.gender = Some(crate::domain::Gender::Female);
        }

        let actions = screen.handle_event(ScreenEvent::SubmitForm);
        assert_eq!(actions[0], Action::CloseForm);
        assert_eq!(severity(&actions), Some(Severity::Success));
        assert!(screen.form().is_none());
        assert_eq!(log.calls(), vec!["create", "list"]);
        assert_eq!(screen.store().list().len(), 3);
    }

    #[test]
    fn failed_save_reports_generic_error_and_keeps_draft() {
        let (mut screen, log) = patient_screen();
        screen.handle_event(ScreenEvent::EditRecord(RecordId::new("1")));
        screen.form_mut().unwrap().draft_mut().unwrap().phone = "0999".into();
        log.fail_next("update");

        let actions = screen.handle_event(ScreenEvent::SubmitForm);
        assert_eq!(
            actions,
            vec![Action::Notify(Notification::error("Could not save patient"))]
        );
        assert_eq!(screen.form().unwrap().draft().phone, "0999");
        assert_eq!(screen.store().list()[0].phone, "0123456789");
    }

    #[test]
    fn edit_of_unknown_record_is_reported() {
        let (mut screen, _) = patient_screen();
        let actions = screen.handle_event(ScreenEvent::EditRecord(RecordId::new("9")));
        assert_eq!(severity(&actions), Some(Severity::Error));
        assert!(screen.form().is_none());
    }

    #[test]
    fn cancel_closes_without_backend_call() {
        let (mut screen, log) = patient_screen();
        screen.handle_event(ScreenEvent::EditRecord(RecordId::new("2")));
        assert_eq!(
            screen.handle_event(ScreenEvent::CancelForm),
            vec![Action::CloseForm]
        );
        assert!(screen.form().is_none());
        assert!(screen.handle_event(ScreenEvent::CancelForm).is_empty());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn repeated_delete_fails_the_second_time() {
        let (mut screen, _) = patient_screen();
        let id = RecordId::new("2");

        let first = screen.handle_event(ScreenEvent::DeleteRecord(id.clone()));
        assert_eq!(severity(&first), Some(Severity::Success));
        assert_eq!(screen.store().list().len(), 1);

        let second = screen.handle_event(ScreenEvent::DeleteRecord(id));
        assert_eq!(
            second,
            vec![Action::Notify(Notification::error("Could not delete patient"))]
        );
    }

    #[test]
    fn appointment_form_derives_specialty() {
        let (backend, log) = RecordingBackend::<Appointment>::new(Vec::new());
        let mut screen = ScreenController::new(RecordStore::new(backend, RefreshPolicy::Reload));
        screen.handle_event(ScreenEvent::NewRecord);

        let directory = DoctorDirectory::from_doctors(&[Doctor {
            name: "BS. Lê Văn C".into(),
            specialty: Some(Specialty::Dermatology),
            ..Doctor::default()
        }]);
        let form = screen.form_mut().unwrap();
        form.select_doctor("BS. Lê Văn C", &directory).unwrap();
        assert_eq!(form.draft().specialty, "Da liễu");

        let actions = screen.handle_event(ScreenEvent::SubmitForm);
        assert_eq!(severity(&actions), Some(Severity::Warning));
        assert!(log.calls().is_empty());
    }
}
