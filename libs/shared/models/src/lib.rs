pub mod appointment;
pub mod error;

pub use appointment::{AppointmentRecord, AppointmentStatus, RescheduleOptions};
pub use error::AppError;
