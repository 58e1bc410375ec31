// libs/messaging-cell/src/lib.rs
//! # Messaging Cell
//!
//! SMS plumbing for the reschedule service: an outbound client for the Twilio
//! Messages REST API and a renderer for TwiML webhook replies.
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |                  Messaging Cell                     |
//! +-----------------------------------------------------+
//! |  models.rs      |  Wire types, transport trait      |
//! |  services/      |                                   |
//! |    twilio.rs    |  Twilio Messages API client       |
//! |    twiml.rs     |  <Response> reply markup          |
//! +-----------------------------------------------------+
//! ```
//!
//! Callers depend on [`SmsTransport`] rather than [`TwilioClient`] so tests and
//! other providers can stand in for the vendor API.
//!
//! ## Configuration
//!
//! - `TWILIO_ACCOUNT_SID` - account that owns the sender number
//! - `TWILIO_API_KEY` / `TWILIO_API_SECRET` - API key credentials
//! - `TWILIO_PHONE_NUMBER` - sender number
//! - `TWILIO_API_BASE_URL` - API origin (optional, defaults to production)

pub mod models;
pub mod services;

pub use models::{InboundSms, MessagingError, SentMessage, SmsTransport};
pub use services::{MessagingResponse, TwilioClient};
pub use services::twiml::TWIML_CONTENT_TYPE;
