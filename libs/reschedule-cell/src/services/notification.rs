// libs/reschedule-cell/src/services/notification.rs
use std::sync::Arc;

use tracing::{error, info, warn};

use messaging_cell::{InboundSms, MessagingResponse, SentMessage, SmsTransport};
use shared_config::AppConfig;
use shared_database::{AppointmentStore, StoreError};
use shared_models::AppointmentRecord;
use shared_utils::normalize_phone;

use crate::models::{InboundCommand, RescheduleError};
use crate::state::RescheduleState;

pub const UNKNOWN_SENDER_REPLY: &str =
    "Sorry, we couldn't find your appointment. Please contact the office.";
pub const USAGE_REPLY: &str = "Sorry, please reply with 1 to reschedule or 2 to be contacted.";

/// Outbound reschedule SMS and replies to patient texts.
pub struct NotificationService {
    config: Arc<AppConfig>,
    store: Arc<dyn AppointmentStore>,
    transport: Arc<dyn SmsTransport>,
}

impl NotificationService {
    pub fn new(state: &RescheduleState) -> Self {
        Self {
            config: state.config.clone(),
            store: state.store.clone(),
            transport: state.transport.clone(),
        }
    }

    pub fn initial_message_body(record: &AppointmentRecord) -> String {
        format!(
            "Hello {}, you missed your appointment on {}.\n\n\
             Reply 1 to reschedule \n\
             or \n\
             2 to have the office call you.\n\n\
             Thank you, {}",
            record.name, record.missed_time, record.facility_name
        )
    }

    /// Text the patient about the missed appointment. Delivery is attempted
    /// once; a transport failure is returned to the caller.
    pub async fn send_initial_message(
        &self,
        record: &AppointmentRecord,
    ) -> Result<SentMessage, RescheduleError> {
        let body = Self::initial_message_body(record);

        match self.transport.send_sms(&record.phone, &body).await {
            Ok(sent) => {
                info!("SMS sent to {}: SID={}", record.phone, sent.sid);
                Ok(sent)
            }
            Err(e) => {
                error!("Failed to send SMS to {}: {}", record.phone, e);
                Err(RescheduleError::Delivery(e))
            }
        }
    }

    /// Build the TwiML reply for a patient's text.
    pub async fn handle_inbound(&self, sms: &InboundSms) -> MessagingResponse {
        info!("Incoming SMS from {}: {}", sms.from, sms.body.trim());

        let suffix = normalize_phone(&sms.from);
        let record = match self.store.find_latest_by_phone(&suffix).await {
            Ok(record) => Some(record),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                warn!("Phone lookup failed for {}: {}", sms.from, e);
                None
            }
        };

        MessagingResponse::reply(self.reply_text(record.as_ref(), InboundCommand::parse(&sms.body)))
    }

    pub fn reply_text(&self, record: Option<&AppointmentRecord>, command: InboundCommand) -> String {
        let Some(record) = record else {
            return UNKNOWN_SENDER_REPLY.to_string();
        };

        match command {
            InboundCommand::Reschedule => format!(
                "Thanks! Click the link to choose a new time:\n{}",
                self.config.secure_link(&record.token)
            ),
            InboundCommand::CallMe => format!(
                "A member of our team will call you soon. Or call us now at {}.",
                self.config.office_callback_number
            ),
            InboundCommand::Unrecognized => USAGE_REPLY.to_string(),
        }
    }
}
