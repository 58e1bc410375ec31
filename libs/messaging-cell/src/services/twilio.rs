// libs/messaging-cell/src/services/twilio.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{
    MessagingError, SentMessage, SmsTransport, TwilioErrorBody, TwilioMessageResource,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Twilio Programmable Messaging client.
/// Based on: https://www.twilio.com/docs/messaging/api/message-resource
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    api_key: String,
    api_secret: String,
    from_number: String,
    base_url: String,
}

impl TwilioClient {
    pub fn new(config: &AppConfig) -> Result<Self, MessagingError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            account_sid: config.twilio_account_sid.clone(),
            api_key: config.twilio_api_key.clone(),
            api_secret: config.twilio_api_secret.clone(),
            from_number: config.twilio_phone_number.clone(),
            base_url: config.twilio_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.api_key.is_empty()
            && !self.api_secret.is_empty()
            && !self.from_number.is_empty()
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }

    /// Create a Message resource
    /// POST /2010-04-01/Accounts/{AccountSid}/Messages.json
    pub async fn create_message(&self, to: &str, body: &str) -> Result<SentMessage, MessagingError> {
        if !self.is_configured() {
            return Err(MessagingError::NotConfigured);
        }

        let url = self.messages_url();
        debug!("Sending message request to: {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Twilio message creation failed: {} - {}", status, response_text);
            let (code, message) = match serde_json::from_str::<TwilioErrorBody>(&response_text) {
                Ok(body) => (body.code, body.message),
                Err(_) => (None, response_text),
            };
            return Err(MessagingError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let resource: TwilioMessageResource = serde_json::from_str(&response_text)
            .map_err(|e| MessagingError::InvalidResponse(format!("Failed to parse message resource: {}", e)))?;

        info!(sid = %resource.sid, to = resource.to.as_deref().unwrap_or(to), "SMS accepted by Twilio");

        Ok(SentMessage {
            sid: resource.sid,
            status: resource.status.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[async_trait]
impl SmsTransport for TwilioClient {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SentMessage, MessagingError> {
        self.create_message(to, body).await
    }
}
