// libs/reschedule-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use messaging_cell::MessagingError;
use shared_database::StoreError;
use shared_models::RescheduleOptions;

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

/// Fields of the initial-message form once required values are present.
#[derive(Debug, Clone)]
pub struct NewAppointmentRequest {
    pub name: String,
    pub phone: String,
    pub missed_time: String,
    pub facility_name: Option<String>,
    pub provider_name: Option<String>,
}

/// Facility logo received with the initial-message form.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmTimeRequest {
    pub token: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewOptionsRequest {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitialMessageResponse {
    pub message: String,
    pub token: String,
}

/// Public view of a session used to brand the reschedule page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandingView {
    pub facility_name: String,
    pub logo_url: Option<String>,
    pub missed_time: String,
    pub provider_name: String,
    pub option1: String,
    pub option2: String,
}

// ==============================================================================
// SELECTION & REPLY COMMANDS
// ==============================================================================

/// Selection value meaning "neither time works, offer new ones".
pub const REQUEST_NEW_OPTIONS: &str = "3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSlot {
    First,
    Second,
}

/// What a patient picked on the reschedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSelection {
    RequestNewOptions,
    Offered(OptionSlot, String),
    /// A value matching neither offered option. Still accepted as the
    /// confirmed time.
    Unlisted(String),
}

impl TimeSelection {
    pub fn classify(raw: &str, offered: &RescheduleOptions) -> Self {
        if raw == REQUEST_NEW_OPTIONS {
            TimeSelection::RequestNewOptions
        } else if raw == offered.option1 {
            TimeSelection::Offered(OptionSlot::First, raw.to_string())
        } else if raw == offered.option2 {
            TimeSelection::Offered(OptionSlot::Second, raw.to_string())
        } else {
            TimeSelection::Unlisted(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// `slot` is `None` when the confirmed text matched neither offered option.
    Confirmed {
        confirmed_time: String,
        slot: Option<OptionSlot>,
    },
    NewOptions(RescheduleOptions),
}

/// Keyword sent back by the patient in reply to the initial SMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundCommand {
    Reschedule,
    CallMe,
    Unrecognized,
}

impl InboundCommand {
    pub fn parse(body: &str) -> Self {
        match body.trim() {
            "1" => InboundCommand::Reschedule,
            "2" => InboundCommand::CallMe,
            _ => InboundCommand::Unrecognized,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum RescheduleError {
    #[error("Invalid missed_time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Appointment not found")]
    NotFound,

    #[error("Failed to send SMS: {0}")]
    Delivery(#[from] MessagingError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

impl From<StoreError> for RescheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => RescheduleError::NotFound,
            StoreError::Backend(msg) => RescheduleError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offered() -> RescheduleOptions {
        RescheduleOptions::new(
            "Tuesday, January 07, 2025 at 10:00 AM",
            "Wednesday, January 08, 2025 at 02:30 PM",
        )
    }

    #[test]
    fn test_classify_selection() {
        let offered = offered();

        assert_eq!(TimeSelection::classify("3", &offered), TimeSelection::RequestNewOptions);
        assert_eq!(
            TimeSelection::classify("Tuesday, January 07, 2025 at 10:00 AM", &offered),
            TimeSelection::Offered(OptionSlot::First, offered.option1.clone())
        );
        assert_eq!(
            TimeSelection::classify("Wednesday, January 08, 2025 at 02:30 PM", &offered),
            TimeSelection::Offered(OptionSlot::Second, offered.option2.clone())
        );
        assert_eq!(
            TimeSelection::classify("next Friday", &offered),
            TimeSelection::Unlisted("next Friday".to_string())
        );
    }

    #[test]
    fn test_only_exact_three_requests_new_options() {
        let offered = offered();
        assert_eq!(TimeSelection::classify(" 3", &offered), TimeSelection::Unlisted(" 3".to_string()));
        assert_eq!(TimeSelection::classify("1", &offered), TimeSelection::Unlisted("1".to_string()));
    }

    #[test]
    fn test_parse_inbound_command() {
        assert_eq!(InboundCommand::parse(" 1\n"), InboundCommand::Reschedule);
        assert_eq!(InboundCommand::parse("2"), InboundCommand::CallMe);
        assert_eq!(InboundCommand::parse("12"), InboundCommand::Unrecognized);
        assert_eq!(InboundCommand::parse(""), InboundCommand::Unrecognized);
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            RescheduleError::from(StoreError::NotFound("x".into())),
            RescheduleError::NotFound
        ));
        assert!(matches!(
            RescheduleError::from(StoreError::Backend("disk full".into())),
            RescheduleError::Storage(_)
        ));
    }
}
