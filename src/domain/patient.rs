//! Patient records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, RecordId};
use super::fields::is_blank;

labeled_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

labeled_enum! {
    pub enum BloodType {
        APositive => "A+",
        ANegative => "A-",
        BPositive => "B+",
        BNegative => "B-",
        AbPositive => "AB+",
        AbNegative => "AB-",
        OPositive => "O+",
        ONegative => "O-",
    }
}

/// Placeholder the front desk types when a patient has no known allergy.
pub const NO_ALLERGY_PLACEHOLDER: &str = "Không có";

/// A registered patient.
///
/// `date_of_birth`, `gender` and `blood_type` are `None` while a draft has not
/// set them; the backend stores those as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub name: String,
    /// Optional contact address; may be empty.
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub phone: String,
    #[serde(with = "super::fields::blank_as_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(with = "super::fields::blank_as_none")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub emergency_contact: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub medical_history: String,
    #[serde(deserialize_with = "super::fields::null_as_empty")]
    pub allergies: String,
    #[serde(with = "super::fields::blank_as_none")]
    pub blood_type: Option<BloodType>,
}

impl Patient {
    /// `true` when an allergy is on file.
    #[must_use]
    pub fn has_allergies(&self) -> bool {
        let allergies = self.allergies.trim();
        !allergies.is_empty() && allergies != NO_ALLERGY_PLACEHOLDER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatientSummary {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub with_allergies: usize,
}

impl Entity for Patient {
    const KIND: EntityKind = EntityKind::Patient;
    type Summary = PatientSummary;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.email.as_str()]
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.phone) {
            missing.push("phone");
        }
        if self.date_of_birth.is_none() {
            missing.push("dateOfBirth");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        missing
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn summarize(records: &[Self]) -> PatientSummary {
        let count_gender =
            |gender: Gender| records.iter().filter(|p| p.gender == Some(gender)).count();

        PatientSummary {
            total: records.len(),
            male: count_gender(Gender::Male),
            female: count_gender(Gender::Female),
            with_allergies: records.iter().filter(|p| p.has_allergies()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_email_decodes_as_empty() {
        let patient: Patient = serde_json::from_str(
            r#"{"id": 4, "name": "Lê Thị F", "email": null, "phone": "0912", "allergies": null}"#,
        )
        .unwrap();
        assert_eq!(patient.email, "");
        assert_eq!(patient.phone, "0912");
        assert!(!patient.has_allergies());
    }

    #[test]
    fn decodes_backend_shape_with_blank_enums() {
        let patient: Patient = serde_json::from_str(
            r#"{"id": "9", "name": "Trần Văn E", "phone": "0987654321",
                "dateOfBirth": "1985-12-20", "gender": "", "bloodType": "O-"}"#,
        )
        .unwrap();
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(1985, 12, 20));
        assert_eq!(patient.gender, None);
        assert_eq!(patient.blood_type, Some(BloodType::ONegative));
        assert_eq!(patient.missing_required_fields(), vec!["gender"]);
    }

    #[test]
    fn encodes_dates_as_iso_strings() {
        let patient = Patient {
            name: "Nguyễn Thị C".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15),
            gender: Some(Gender::Female),
            ..Patient::default()
        };
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-05-15");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["bloodType"], "");
    }

    #[test]
    fn placeholder_allergy_text_is_not_an_allergy() {
        let mut patient = Patient {
            allergies: NO_ALLERGY_PLACEHOLDER.into(),
            ..Patient::default()
        };
        assert!(!patient.has_allergies());
        patient.allergies = "Dị ứng penicillin".into();
        assert!(patient.has_allergies());
    }

    #[test]
    fn summary_splits_by_gender() {
        let male = Patient {
            gender: Some(Gender::Male),
            ..Patient::default()
        };
        let other = Patient {
            gender: Some(Gender::Other),
            allergies: "Hải sản".into(),
            ..Patient::default()
        };
        let summary = Patient::summarize(&[male.clone(), male, other]);
        assert_eq!(
            summary,
            PatientSummary {
                total: 3,
                male: 2,
                female: 0,
                with_allergies: 1
            }
        );
    }
}
