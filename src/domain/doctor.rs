//! Doctor records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::{Entity, EntityKind, RecordId};
use super::fields::is_blank;

labeled_enum! {
    /// Medical specialty a doctor practices.
    ///
    /// The labels are the values stored by the backend.
    pub enum Specialty {
        Cardiology => "Tim mạch",
        Pediatrics => "Nhi khoa",
        Dermatology => "Da liễu",
        Neurology => "Thần kinh",
        InternalMedicine => "Nội tổng hợp",
        GeneralSurgery => "Ngoại tổng hợp",
        Obstetrics => "Sản phụ khoa",
        Ophthalmology => "Mắt",
        Otolaryngology => "Tai mũi họng",
        Odontology => "Răng hàm mặt",
    }
}

/// Availability slot labels offered when editing a doctor.
pub const AVAILABILITY_SLOTS: &[&str] = &[
    "08:00-10:00",
    "10:00-12:00",
    "14:00-16:00",
    "16:00-18:00",
    "18:00-20:00",
];

/// A doctor on staff.
///
/// `availability` is a set: order carries no meaning and duplicates collapse.
/// No overlap or conflict checking is done on the slot labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Doctor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub phone: String,
    #[serde(with = "super::fields::blank_as_none")]
    pub specialty: Option<Specialty>,
    /// Years of experience, kept as the free text the form collects.
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub experience: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub education: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub availability: BTreeSet<String>,
}

impl Doctor {
    /// Adds the slot if absent, removes it if present.
    pub fn toggle_availability(&mut self, slot: &str) {
        if !self.availability.remove(slot) {
            self.availability.insert(slot.to_string());
        }
    }

    /// Specialty label, or an empty string when none is chosen yet.
    #[must_use]
    pub fn specialty_label(&self) -> &'static str {
        self.specialty.map_or("", Specialty::as_str)
    }
}

/// Figures shown above the doctor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoctorSummary {
    pub total: usize,
    /// Doctors with at least one availability slot.
    pub available: usize,
}

impl Entity for Doctor {
    const KIND: EntityKind = EntityKind::Doctor;
    type Summary = DoctorSummary;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.specialty_label(), self.email.as_str()]
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if is_blank(&self.phone) {
            missing.push("phone");
        }
        if self.specialty.is_none() {
            missing.push("specialty");
        }
        missing
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn summarize(records: &[Self]) -> DoctorSummary {
        DoctorSummary {
            total: records.len(),
            available: records.iter().filter(|d| !d.availability.is_empty()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardiologist() -> Doctor {
        Doctor {
            name: "BS. Nguyễn Văn A".into(),
            email: "nguyenvana@hospital.com".into(),
            phone: "0123456789".into(),
            specialty: Some(Specialty::Cardiology),
            ..Doctor::default()
        }
    }

    #[test]
    fn toggling_a_slot_twice_restores_the_set() {
        let mut doctor = cardiologist();
        doctor.toggle_availability("08:00-10:00");
        assert!(doctor.availability.contains("08:00-10:00"));
        doctor.toggle_availability("08:00-10:00");
        assert!(doctor.availability.is_empty());
    }

    #[test]
    fn draft_payload_has_no_id_and_camel_case_keys() {
        let json = serde_json::to_value(cardiologist()).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["specialty"], "Tim mạch");
        assert_eq!(json["availability"], serde_json::json!([]));
    }

    #[test]
    fn decodes_backend_record_with_integer_id() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id": 3, "name": "BS. Lê Văn C", "email": "c@x.vn", "phone": "1",
                "specialty": "Da liễu", "availability": ["14:00-16:00", "08:00-10:00"]}"#,
        )
        .unwrap();
        assert_eq!(doctor.id, Some(RecordId::new("3")));
        assert_eq!(doctor.specialty, Some(Specialty::Dermatology));
        assert_eq!(doctor.availability.len(), 2);
        assert!(doctor.education.is_empty());
    }

    #[test]
    fn blank_doctor_misses_all_required_fields() {
        assert_eq!(
            Doctor::default().missing_required_fields(),
            vec!["name", "email", "phone", "specialty"]
        );
        assert!(cardiologist().missing_required_fields().is_empty());
    }

    #[test]
    fn summary_counts_doctors_with_slots() {
        let mut busy = cardiologist();
        busy.toggle_availability("10:00-12:00");
        let summary = Doctor::summarize(&[busy, cardiologist()]);
        assert_eq!(summary, DoctorSummary { total: 2, available: 1 });
    }

    #[test]
    fn list_params_are_ignored_for_doctors() {
        let doctor = cardiologist();
        assert!(doctor.matches_param("status", "confirmed"));
        assert!(doctor.matches_param("doctor", "someone else"));
    }
}
