// libs/reschedule-cell/src/services/branding.rs
use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::AppointmentStore;
use shared_models::AppointmentRecord;

use crate::models::{BrandingView, RescheduleError};
use crate::state::RescheduleState;

/// Read-only projection of a session for the public reschedule page.
pub struct BrandingService {
    config: Arc<AppConfig>,
    store: Arc<dyn AppointmentStore>,
}

impl BrandingService {
    pub fn new(state: &RescheduleState) -> Self {
        Self {
            config: state.config.clone(),
            store: state.store.clone(),
        }
    }

    pub async fn get_branding(&self, token: &str) -> Result<BrandingView, RescheduleError> {
        let record = self.store.get(token).await?;
        Ok(self.project(record))
    }

    fn project(&self, record: AppointmentRecord) -> BrandingView {
        BrandingView {
            logo_url: record
                .logo_filename
                .as_deref()
                .map(|filename| self.config.logo_url(filename)),
            facility_name: record.facility_name,
            missed_time: record.missed_time,
            provider_name: record.provider_name,
            option1: record.options.option1,
            option2: record.options.option2,
        }
    }
}
