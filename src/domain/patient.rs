//! Patient records held in the waiting queue and the in-service slot.
//!
//! Field names follow the persisted JSON layout (`imageBase64`), so a record
//! round-trips through the store without a separate DTO.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::QueueError;

/// A patient waiting to be attended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Display name, trimmed and never empty
    pub name: String,

    /// Photo as a data URL (`data:<mime>;base64,...`)
    #[serde(rename = "imageBase64", default)]
    pub image_base64: Option<String>,

    /// When the patient was added
    pub timestamp: DateTime<Utc>,

    /// Whether the patient entered through the urgent lane
    pub urgent: bool,
}

impl Patient {
    /// Create a patient stamped with the current time.
    ///
    /// # Errors
    /// Returns `QueueError::Validation` if the name is empty after trimming.
    pub fn new(
        name: &str,
        image_base64: Option<String>,
        urgent: bool,
    ) -> Result<Self, QueueError> {
        Ok(Self {
            name: validate_name(name)?,
            image_base64,
            timestamp: Utc::now(),
            urgent,
        })
    }

    /// Local time of day the patient was added, e.g. `14:05:09`.
    #[must_use]
    pub fn time_of_day(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// The patient currently being attended.
///
/// Only the name and photo survive the move out of the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPatient {
    pub name: String,

    #[serde(rename = "imageBase64", default)]
    pub image_base64: Option<String>,
}

impl From<Patient> for CurrentPatient {
    fn from(patient: Patient) -> Self {
        Self {
            name: patient.name,
            image_base64: patient.image_base64,
        }
    }
}

/// Trim a user-supplied name and reject it if nothing is left.
///
/// # Errors
/// Returns `QueueError::Validation` for empty or whitespace-only names.
pub fn validate_name(raw: &str) -> Result<String, QueueError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(QueueError::Validation(
            "Patient name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let patient = Patient::new("  Ana Souza \t", None, false).expect("Should create");
        assert_eq!(patient.name, "Ana Souza");
        assert!(!patient.urgent);
        assert!(patient.image_base64.is_none());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Patient::new("", None, false),
            Err(QueueError::Validation(_))
        ));
        assert!(matches!(
            Patient::new("   \n", None, true),
            Err(QueueError::Validation(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let patient = Patient::new("Ana", Some("data:image/png;base64,AAAA".into()), true)
            .expect("Should create");
        let value = serde_json::to_value(&patient).expect("Should serialize");

        assert_eq!(value["name"], "Ana");
        assert_eq!(value["imageBase64"], "data:image/png;base64,AAAA");
        assert_eq!(value["urgent"], true);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_null_image_accepted() {
        let json = r#"{"name":"Bruno","imageBase64":null,"timestamp":"2024-05-01T12:30:00.000Z","urgent":false}"#;
        let patient: Patient = serde_json::from_str(json).expect("Should parse");
        assert_eq!(patient.name, "Bruno");
        assert!(patient.image_base64.is_none());
        assert_eq!(patient.time_of_day().len(), 8);
    }

    #[test]
    fn test_current_from_patient() {
        let patient = Patient::new("Carla", None, true).expect("Should create");
        let current = CurrentPatient::from(patient);
        assert_eq!(current.name, "Carla");
        let value = serde_json::to_value(&current).expect("Should serialize");
        assert!(value["imageBase64"].is_null());
        assert!(value.get("urgent").is_none());
    }
}
