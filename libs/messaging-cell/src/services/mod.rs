// libs/messaging-cell/src/services/mod.rs

pub mod twilio;
pub mod twiml;

pub use twilio::TwilioClient;
pub use twiml::MessagingResponse;
