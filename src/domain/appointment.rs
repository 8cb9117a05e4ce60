//! Appointment records.
//!
//! Patient and doctor details are copied onto the appointment as plain strings
//! rather than referenced by id. Deleting or renaming a doctor leaves existing
//! appointments untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, RecordId};
use super::fields::is_blank;

labeled_enum! {
    /// Progress of an appointment.
    ///
    /// The normal path is `Scheduled → Confirmed → Completed`; any
    /// non-terminal state may move to `Cancelled`.
    pub enum AppointmentStatus {
        Scheduled => "scheduled",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl AppointmentStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Bookable start times, in half-hour steps around the lunch break.
pub const APPOINTMENT_SLOTS: &[&str] = &[
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

/// A booked consultation.
///
/// `specialty` is derived from the chosen doctor by the form session and is
/// not edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub patient_name: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub patient_phone: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub doctor_name: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub specialty: String,
    #[serde(with = "super::fields::blank_as_none")]
    pub appointment_date: Option<NaiveDate>,
    /// One of [`APPOINTMENT_SLOTS`].
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub appointment_time: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub reason: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub status: AppointmentStatus,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppointmentSummary {
    pub total: usize,
    /// Appointments still scheduled or confirmed.
    pub open: usize,
    pub scheduled: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;
    type Summary = AppointmentSummary;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.patient_name.as_str(),
            self.doctor_name.as_str(),
            self.specialty.as_str(),
            self.patient_phone.as_str(),
        ]
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.patient_name) {
            missing.push("patientName");
        }
        if is_blank(&self.patient_phone) {
            missing.push("patientPhone");
        }
        if is_blank(&self.doctor_name) {
            missing.push("doctorName");
        }
        if self.appointment_date.is_none() {
            missing.push("appointmentDate");
        }
        if is_blank(&self.appointment_time) {
            missing.push("appointmentTime");
        }
        if is_blank(&self.reason) {
            missing.push("reason");
        }
        missing
    }

    fn display_name(&self) -> &str {
        &self.patient_name
    }

    fn matches_param(&self, key: &str, value: &str) -> bool {
        match key {
            "doctor" => self.doctor_name == value,
            "status" => self.status.as_str() == value,
            _ => true,
        }
    }

    fn summarize(records: &[Self]) -> AppointmentSummary {
        records.iter().fold(
            AppointmentSummary {
                total: records.len(),
                ..AppointmentSummary::default()
            },
            |mut summary, appointment| {
                if !appointment.status.is_terminal() {
                    summary.open += 1;
                }
                match appointment.status {
                    AppointmentStatus::Scheduled => summary.scheduled += 1,
                    AppointmentStatus::Confirmed => summary.confirmed += 1,
                    AppointmentStatus::Completed => summary.completed += 1,
                    AppointmentStatus::Cancelled => summary.cancelled += 1,
                }
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drafts_start_scheduled() {
        assert_eq!(Appointment::default().status, AppointmentStatus::Scheduled);
        assert!(!AppointmentStatus::Confirmed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn decodes_camel_case_backend_record() {
        let appointment: Appointment = serde_json::from_str(
            r#"{"id": 12, "patientName": "Nguyễn Thị C", "patientPhone": "0123",
                "doctorName": "BS. Trần Thị B", "specialty": "Nhi khoa",
                "appointmentDate": "2026-11-02", "appointmentTime": "09:30",
                "reason": "Sốt", "status": "confirmed", "notes": ""}"#,
        )
        .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.appointment_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert!(appointment.missing_required_fields().is_empty());
    }

    #[test]
    fn null_optional_text_decodes_as_empty() {
        let appointments: Vec<Appointment> = serde_json::from_str(
            r#"[
                {"id": 1, "patientName": "An", "reason": "Ho", "status": "scheduled"},
                {"id": 2, "patientName": "Binh", "reason": "Sốt", "status": "confirmed", "notes": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[1].notes, "");
        assert_eq!(appointments[1].patient_name, "Binh");

        let appointment: Appointment =
            serde_json::from_str(r#"{"specialty": null, "status": null}"#).unwrap();
        assert_eq!(appointment.specialty, "");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<Appointment>(r#"{"status": "lost"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn summary_counts_each_status() {
        let with_status = |status| Appointment {
            status,
            ..Appointment::default()
        };
        let summary = Appointment::summarize(&[
            with_status(AppointmentStatus::Scheduled),
            with_status(AppointmentStatus::Scheduled),
            with_status(AppointmentStatus::Completed),
        ]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.scheduled, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.cancelled, 0);
    }

    #[test]
    fn list_params_match_doctor_and_status() {
        let appointment = Appointment {
            doctor_name: "BS. Lê Văn C".into(),
            status: AppointmentStatus::Confirmed,
            ..Appointment::default()
        };
        assert!(appointment.matches_param("doctor", "BS. Lê Văn C"));
        assert!(!appointment.matches_param("doctor", "BS. Lê Văn"));
        assert!(appointment.matches_param("status", "confirmed"));
        assert!(!appointment.matches_param("status", "scheduled"));
        assert!(appointment.matches_param("page", "2"));
    }

    #[test]
    fn slots_cover_morning_and_afternoon() {
        assert_eq!(APPOINTMENT_SLOTS.len(), 16);
        assert_eq!(APPOINTMENT_SLOTS.first(), Some(&"08:00"));
        assert_eq!(APPOINTMENT_SLOTS.last(), Some(&"17:30"));
    }
}
