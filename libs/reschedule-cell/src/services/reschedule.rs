// libs/reschedule-cell/src/services/reschedule.rs
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use shared_database::{AppointmentStore, BlobStore};
use shared_models::{AppointmentRecord, AppointmentStatus, RescheduleOptions};
use shared_utils::normalize_phone;

use crate::models::{
    LogoUpload, NewAppointmentRequest, RescheduleError, SelectionOutcome, TimeSelection,
    REQUEST_NEW_OPTIONS,
};
use crate::services::scheduler::{local_now, parse_display_time, reschedule_options};
use crate::services::token::generate_token;
use crate::state::RescheduleState;

pub type Clock = fn() -> NaiveDateTime;

/// Session lifecycle: create, look up, confirm and regenerate options.
pub struct RescheduleService {
    store: Arc<dyn AppointmentStore>,
    logos: Arc<dyn BlobStore>,
    default_provider_name: String,
    clock: Clock,
}

impl RescheduleService {
    pub fn new(state: &RescheduleState) -> Self {
        Self {
            store: state.store.clone(),
            logos: state.logos.clone(),
            default_provider_name: state.config.default_provider_name.clone(),
            clock: local_now,
        }
    }

    /// Replace the wall clock used when options are regenerated.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn create_appointment(
        &self,
        request: NewAppointmentRequest,
        logo: Option<LogoUpload>,
    ) -> Result<AppointmentRecord, RescheduleError> {
        let missed = parse_display_time(&request.missed_time)?;
        let options = reschedule_options(missed)?;
        let token = generate_token();

        let logo_filename = match logo {
            Some(upload) => self.store_logo(&token, upload).await?,
            None => None,
        };

        let record = AppointmentRecord {
            token: token.clone(),
            name: request.name,
            phone: request.phone,
            missed_time: request.missed_time,
            status: AppointmentStatus::LinkSent,
            facility_name: request.facility_name.unwrap_or_default(),
            provider_name: request
                .provider_name
                .unwrap_or_else(|| self.default_provider_name.clone()),
            logo_filename,
            options,
            confirmed_time: None,
            created_at: Utc::now(),
        };

        self.store.insert(record.clone()).await?;
        info!(token = %token, "Created reschedule session");

        Ok(record)
    }

    pub async fn get_appointment(&self, token: &str) -> Result<AppointmentRecord, RescheduleError> {
        Ok(self.store.get(token).await?)
    }

    /// Newest session for a phone number, compared on its last ten digits.
    pub async fn find_by_phone(&self, phone: &str) -> Result<AppointmentRecord, RescheduleError> {
        let suffix = normalize_phone(phone);
        Ok(self.store.find_latest_by_phone(&suffix).await?)
    }

    pub async fn select_time(
        &self,
        token: &str,
        selection: &str,
    ) -> Result<SelectionOutcome, RescheduleError> {
        if selection == REQUEST_NEW_OPTIONS {
            let options = self.regenerate_options(token).await?;
            return Ok(SelectionOutcome::NewOptions(options));
        }

        // Classified against the options the confirm itself saw
        let record = self.store.confirm(token, selection).await?;
        let slot = match TimeSelection::classify(selection, &record.options) {
            TimeSelection::Offered(slot, _) => {
                debug!(token = %token, ?slot, "Offered option selected");
                Some(slot)
            }
            _ => {
                warn!(token = %token, selection = %selection, "Confirming a time that was not offered");
                None
            }
        };
        info!("Confirmed appointment for {} at {}", record.name, selection);

        Ok(SelectionOutcome::Confirmed {
            confirmed_time: selection.to_string(),
            slot,
        })
    }

    /// Offer a fresh pair of times computed from the current time.
    pub async fn regenerate_options(&self, token: &str) -> Result<RescheduleOptions, RescheduleError> {
        let options = reschedule_options((self.clock)())?;
        let record = self.store.replace_options(token, options).await?;
        debug!(token = %token, "Regenerated reschedule options");
        Ok(record.options)
    }

    async fn store_logo(
        &self,
        token: &str,
        upload: LogoUpload,
    ) -> Result<Option<String>, RescheduleError> {
        let Some(filename) = logo_blob_name(token, &upload.filename) else {
            return Ok(None);
        };

        self.logos.put(&filename, &upload.data).await?;
        debug!(token = %token, logo = %filename, "Stored facility logo");
        Ok(Some(filename))
    }
}

/// Blob name for an uploaded logo: `{token}_{basename}` with spaces replaced.
/// Returns `None` when the client sent no usable filename.
pub fn logo_blob_name(token: &str, client_filename: &str) -> Option<String> {
    let basename = client_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .replace(' ', "_");

    if basename.is_empty() || basename == "." || basename == ".." {
        return None;
    }

    Some(format!("{}_{}", token, basename))
}
