use async_trait::async_trait;
use thiserror::Error;

use shared_models::{AppointmentRecord, RescheduleOptions};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No appointment for token {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Keyed storage for reschedule sessions.
///
/// Every mutating call is applied atomically with respect to other calls on
/// the same store, so a confirm racing a regenerate on one token is
/// serialized rather than interleaved.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Store a new record. Token uniqueness is not checked: a colliding
    /// token replaces the earlier record.
    async fn insert(&self, record: AppointmentRecord) -> Result<(), StoreError>;

    async fn get(&self, token: &str) -> Result<AppointmentRecord, StoreError>;

    /// Newest record whose phone shares the given normalized suffix.
    async fn find_latest_by_phone(&self, phone_suffix: &str) -> Result<AppointmentRecord, StoreError>;

    async fn replace_options(
        &self,
        token: &str,
        options: RescheduleOptions,
    ) -> Result<AppointmentRecord, StoreError>;

    async fn confirm(&self, token: &str, confirmed_time: &str) -> Result<AppointmentRecord, StoreError>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
