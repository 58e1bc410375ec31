use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one reschedule session for a missed appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub token: String,
    pub name: String,
    pub phone: String,
    /// Missed appointment time, kept in its display format.
    pub missed_time: String,
    pub status: AppointmentStatus,
    pub facility_name: String,
    pub provider_name: String,
    /// Key into the logo blob store, if a logo was uploaded.
    pub logo_filename: Option<String>,
    #[serde(flatten)]
    pub options: RescheduleOptions,
    pub confirmed_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AppointmentRecord {
    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }

    /// Mark the appointment confirmed. Status never moves back to `LinkSent`;
    /// confirming again only replaces the confirmed time.
    pub fn confirm(&mut self, confirmed_time: impl Into<String>) {
        self.status = AppointmentStatus::Confirmed;
        self.confirmed_time = Some(confirmed_time.into());
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    LinkSent,
    Confirmed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::LinkSent => write!(f, "link_sent"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// The pair of reschedule times currently offered to the patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RescheduleOptions {
    pub option1: String,
    pub option2: String,
}

impl RescheduleOptions {
    pub fn new(option1: impl Into<String>, option2: impl Into<String>) -> Self {
        Self {
            option1: option1.into(),
            option2: option2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> AppointmentRecord {
        AppointmentRecord {
            token: "ab12cd34".to_string(),
            name: "Alice".to_string(),
            phone: "615-555-1212".to_string(),
            missed_time: "Monday, January 06, 2025 at 09:00 AM".to_string(),
            status: AppointmentStatus::LinkSent,
            facility_name: "Green Hills Clinic".to_string(),
            provider_name: "Jane Roberts, FNP".to_string(),
            logo_filename: None,
            options: RescheduleOptions::new(
                "Tuesday, January 07, 2025 at 10:00 AM",
                "Wednesday, January 08, 2025 at 02:30 PM",
            ),
            confirmed_time: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirm_overwrites_confirmed_time() {
        let mut record = record();
        record.confirm("Tuesday, January 07, 2025 at 10:00 AM");
        record.confirm("Wednesday, January 08, 2025 at 02:30 PM");

        assert!(record.is_confirmed());
        assert_eq!(
            record.confirmed_time.as_deref(),
            Some("Wednesday, January 08, 2025 at 02:30 PM")
        );
    }

    #[test]
    fn test_serializes_flat_options_and_snake_case_status() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["status"], json!("link_sent"));
        assert_eq!(value["option1"], json!("Tuesday, January 07, 2025 at 10:00 AM"));
        assert_eq!(value["option2"], json!("Wednesday, January 08, 2025 at 02:30 PM"));
    }
}
