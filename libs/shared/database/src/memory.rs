use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use shared_models::{AppointmentRecord, RescheduleOptions};
use shared_utils::normalize_phone;

use crate::store::{AppointmentStore, StoreError};

#[derive(Default)]
struct Inner {
    records: HashMap<String, AppointmentRecord>,
    /// Normalized phone suffix -> tokens in insertion order, newest last.
    by_phone: HashMap<String, Vec<String>>,
}

impl Inner {
    fn unindex(&mut self, token: &str, phone: &str) {
        let suffix = normalize_phone(phone);
        if let Some(tokens) = self.by_phone.get_mut(&suffix) {
            tokens.retain(|t| t != token);
            if tokens.is_empty() {
                self.by_phone.remove(&suffix);
            }
        }
    }

    fn record_mut(&mut self, token: &str) -> Result<&mut AppointmentRecord, StoreError> {
        self.records
            .get_mut(token)
            .ok_or_else(|| StoreError::NotFound(token.to_string()))
    }
}

/// Process-lifetime store. Records are never evicted.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    inner: RwLock<Inner>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn insert(&self, record: AppointmentRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(previous) = inner.records.remove(&record.token) {
            warn!(token = %record.token, "Token collision, replacing existing appointment");
            inner.unindex(&previous.token, &previous.phone);
        }

        let suffix = normalize_phone(&record.phone);
        inner
            .by_phone
            .entry(suffix)
            .or_default()
            .push(record.token.clone());

        debug!(token = %record.token, "Stored appointment");
        inner.records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<AppointmentRecord, StoreError> {
        self.inner
            .read()
            .await
            .records
            .get(token)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(token.to_string()))
    }

    async fn find_latest_by_phone(&self, phone_suffix: &str) -> Result<AppointmentRecord, StoreError> {
        let not_found = || StoreError::NotFound(format!("phone suffix {}", phone_suffix));
        if phone_suffix.is_empty() {
            return Err(not_found());
        }

        let inner = self.inner.read().await;
        inner
            .by_phone
            .get(phone_suffix)
            .and_then(|tokens| tokens.last())
            .and_then(|token| inner.records.get(token))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn replace_options(
        &self,
        token: &str,
        options: RescheduleOptions,
    ) -> Result<AppointmentRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner.record_mut(token)?;
        record.options = options;
        Ok(record.clone())
    }

    async fn confirm(&self, token: &str, confirmed_time: &str) -> Result<AppointmentRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner.record_mut(token)?;
        record.confirm(confirmed_time);
        Ok(record.clone())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
