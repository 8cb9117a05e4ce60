//! The dashboard: one screen per entity kind plus the assistant.

use crate::chatbot::Conversation;
use crate::domain::{
    seed, Appointment, AppointmentSummary, Doctor, DoctorSummary, Entity, Patient,
    PatientSummary, Result,
};
use crate::form::DoctorDirectory;
use crate::infrastructure::expand_tilde;
use crate::remote::{ApiClient, HttpResource};
use crate::screen::{Action, ScreenController, ScreenEvent};
use crate::storage::{MemoryBackend, RecordStore, RefreshPolicy, SeedFile};
use crate::{BackendKind, Config};

/// Sections of the dashboard, as listed in its navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Doctors,
    Patients,
    Appointments,
    Assistant,
}

/// Headline figures across all three collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    pub doctors: DoctorSummary,
    pub patients: PatientSummary,
    pub appointments: AppointmentSummary,
}

/// Owns every screen's state. There are no process-wide singletons; two
/// dashboards never share records.
#[derive(Debug)]
pub struct Dashboard {
    pub doctors: ScreenController<Doctor>,
    pub patients: ScreenController<Patient>,
    pub appointments: ScreenController<Appointment>,
    pub assistant: Conversation,
}

impl Dashboard {
    /// Builds the screens described by `config`. Nothing is fetched yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or the HTTP client
    /// cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        let _span = tracing::debug_span!("dashboard_from_config").entered();

        let fixtures = match config.seed_file.as_deref() {
            Some(path) => SeedFile::load(&expand_tilde(path))?,
            None => SeedFile {
                doctors: seed::sample_doctors(),
                patients: seed::sample_patients(),
                appointments: Vec::new(),
            },
        };

        let uses_remote = [
            config.doctor_backend,
            config.patient_backend,
            config.appointment_backend,
        ]
        .contains(&BackendKind::Remote);
        let client = if uses_remote {
            Some(ApiClient::new(&config.api_base_url, config.request_timeout())?)
        } else {
            None
        };

        let policy = config.refresh_policy;
        Ok(Self {
            doctors: screen(config.doctor_backend, client.as_ref(), fixtures.doctors, policy),
            patients: screen(config.patient_backend, client.as_ref(), fixtures.patients, policy),
            appointments: screen(
                config.appointment_backend,
                client.as_ref(),
                fixtures.appointments,
                policy,
            ),
            assistant: Conversation::new(),
        })
    }

    /// Loads all three collections, returning any failure notifications.
    pub fn load_all(&mut self) -> Vec<Action> {
        let mut actions = self.doctors.handle_event(ScreenEvent::Load);
        actions.extend(self.patients.handle_event(ScreenEvent::Load));
        actions.extend(self.appointments.handle_event(ScreenEvent::Load));
        actions
    }

    /// Doctors offered by the appointment form.
    ///
    /// Built from the loaded doctor list; the built-in roster is used until
    /// doctors have been loaded.
    #[must_use]
    pub fn doctor_directory(&self) -> DoctorDirectory {
        let doctors = self.doctors.store().list();
        if doctors.is_empty() {
            DoctorDirectory::default()
        } else {
            DoctorDirectory::from_doctors(doctors)
        }
    }

    #[must_use]
    pub fn overview(&self) -> Overview {
        Overview {
            doctors: self.doctors.summary(),
            patients: self.patients.summary(),
            appointments: self.appointments.summary(),
        }
    }
}

fn screen<E: Entity + 'static>(
    kind: BackendKind,
    client: Option<&ApiClient>,
    fixtures: Vec<E>,
    policy: RefreshPolicy,
) -> ScreenController<E> {
    let store = match (kind, client) {
        (BackendKind::Remote, Some(client)) => {
            tracing::debug!(kind = %E::KIND, base_url = client.base_url(), "using remote backend");
            RecordStore::new(HttpResource::new(client.clone()), policy)
        }
        _ => {
            tracing::debug!(kind = %E::KIND, fixtures = fixtures.len(), "using memory backend");
            RecordStore::new(MemoryBackend::new(fixtures), policy)
        }
    };
    ScreenController::new(store)
}
