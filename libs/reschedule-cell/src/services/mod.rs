// libs/reschedule-cell/src/services/mod.rs

pub mod branding;
pub mod notification;
pub mod reschedule;
pub mod scheduler;
pub mod token;

pub use branding::BrandingService;
pub use notification::NotificationService;
pub use reschedule::RescheduleService;
