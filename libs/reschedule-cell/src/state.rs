// libs/reschedule-cell/src/state.rs
use std::sync::Arc;

use messaging_cell::{MessagingError, SmsTransport, TwilioClient};
use shared_config::AppConfig;
use shared_database::{AppointmentStore, BlobStore, FileBlobStore, InMemoryAppointmentStore};

/// Collaborators shared by every reschedule handler.
#[derive(Clone)]
pub struct RescheduleState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn AppointmentStore>,
    pub transport: Arc<dyn SmsTransport>,
    pub logos: Arc<dyn BlobStore>,
}

impl RescheduleState {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn AppointmentStore>,
        transport: Arc<dyn SmsTransport>,
        logos: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
            logos,
        }
    }

    /// Production wiring: in-memory store, Twilio transport and logos on disk
    /// under the static directory.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, MessagingError> {
        let transport = TwilioClient::new(&config)?;
        let logos = FileBlobStore::new(config.logo_upload_dir());

        Ok(Self::new(
            config,
            Arc::new(InMemoryAppointmentStore::new()),
            Arc::new(transport),
            Arc::new(logos),
        ))
    }
}
