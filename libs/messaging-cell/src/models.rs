// libs/messaging-cell/src/models.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Anything able to deliver a text message to a phone number.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SentMessage, MessagingError>;
}

/// Provider receipt for an accepted outbound message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentMessage {
    pub sid: String,
    pub status: String,
}

/// Message resource returned by `POST /Messages.json`.
#[derive(Debug, Deserialize)]
pub struct TwilioMessageResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Error body returned by the Twilio REST API.
#[derive(Debug, Deserialize)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}

/// Form fields of an incoming-message webhook. Twilio posts many more
/// fields; only sender and text are read.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSms {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Messaging provider not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twilio API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}
