//! Doctor directory used to derive an appointment's specialty.

use crate::domain::{Doctor, Specialty};

/// A doctor offered in the appointment form's picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorChoice {
    pub name: String,
    pub specialty: String,
}

impl DoctorChoice {
    fn new(name: &str, specialty: Specialty) -> Self {
        Self {
            name: name.to_string(),
            specialty: specialty.as_str().to_string(),
        }
    }
}

/// Name to specialty lookup for the appointment form.
///
/// The default directory is the fixed roster the booking form offers when no
/// doctor list has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDirectory {
    entries: Vec<DoctorChoice>,
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self {
            entries: vec![
                DoctorChoice::new("BS. Nguyễn Văn A", Specialty::Cardiology),
                DoctorChoice::new("BS. Trần Thị B", Specialty::Pediatrics),
                DoctorChoice::new("BS. Lê Văn C", Specialty::Dermatology),
                DoctorChoice::new("BS. Phạm Thị D", Specialty::Neurology),
                DoctorChoice::new("BS. Hoàng Văn E", Specialty::InternalMedicine),
            ],
        }
    }
}

impl DoctorDirectory {
    /// Builds the directory from loaded doctor records.
    #[must_use]
    pub fn from_doctors(doctors: &[Doctor]) -> Self {
        Self {
            entries: doctors
                .iter()
                .map(|doctor| DoctorChoice {
                    name: doctor.name.clone(),
                    specialty: doctor.specialty_label().to_string(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[DoctorChoice] {
        &self.entries
    }

    /// Specialty of the doctor called exactly `name`.
    #[must_use]
    pub fn specialty_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.specialty.as_str())
    }
}
