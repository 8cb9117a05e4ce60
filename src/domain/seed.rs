//! Built-in sample records for screens running on the in-memory backend.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::doctor::{Doctor, Specialty};
use super::entity::RecordId;
use super::patient::{BloodType, Gender, Patient, NO_ALLERGY_PLACEHOLDER};

fn slots(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|slot| (*slot).to_string()).collect()
}

#[must_use]
pub fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: Some(RecordId::new("1")),
            name: "BS. Nguyễn Văn A".into(),
            email: "nguyenvana@hospital.com".into(),
            phone: "0123456789".into(),
            specialty: Some(Specialty::Cardiology),
            experience: "10".into(),
            education: "Đại học Y Hà Nội".into(),
            description: "Chuyên gia điều trị các bệnh tim mạch với 10 năm kinh nghiệm".into(),
            availability: slots(&["08:00-10:00", "14:00-16:00"]),
        },
        Doctor {
            id: Some(RecordId::new("2")),
            name: "BS. Trần Thị B".into(),
            email: "tranthib@hospital.com".into(),
            phone: "0987654321".into(),
            specialty: Some(Specialty::Pediatrics),
            experience: "8".into(),
            education: "Đại học Y Dược TP.HCM".into(),
            description: "Bác sỹ nhi khoa giàu kinh nghiệm trong điều trị trẻ em".into(),
            availability: slots(&["10:00-12:00", "16:00-18:00"]),
        },
    ]
}

#[must_use]
pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: Some(RecordId::new("1")),
            name: "Nguyễn Thị C".into(),
            email: "nguyenthic@email.com".into(),
            phone: "0123456789".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15),
            gender: Some(Gender::Female),
            address: "123 Đường ABC, Quận 1, TP.HCM".into(),
            emergency_contact: "Nguyễn Văn D - 0987654321".into(),
            medical_history: "Tiền sử cao huyết áp".into(),
            allergies: "Dị ứng penicillin".into(),
            blood_type: Some(BloodType::APositive),
        },
        Patient {
            id: Some(RecordId::new("2")),
            name: "Trần Văn E".into(),
            email: "tranvane@email.com".into(),
            phone: "0987654321".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 20),
            gender: Some(Gender::Male),
            address: "456 Đường XYZ, Quận 3, TP.HCM".into(),
            emergency_contact: "Trần Thị F - 0123456789".into(),
            medical_history: "Phẫu thuật ruột thừa năm 2010".into(),
            allergies: NO_ALLERGY_PLACEHOLDER.into(),
            blood_type: Some(BloodType::ONegative),
        },
    ]
}
