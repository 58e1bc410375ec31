use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com";
pub const DEFAULT_FRONTEND_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_BACKEND_PUBLIC_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_OFFICE_CALLBACK_NUMBER: &str = "615-867-5309";
pub const DEFAULT_PROVIDER_NAME: &str = "Jane Roberts, FNP";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub twilio_account_sid: String,
    pub twilio_api_key: String,
    pub twilio_api_secret: String,
    pub twilio_phone_number: String,
    pub twilio_api_base_url: String,
    /// Where the patient-facing reschedule page is hosted.
    pub frontend_public_url: String,
    /// Public origin of this service, used to build logo URLs.
    pub backend_public_url: String,
    pub office_callback_number: String,
    pub default_provider_name: String,
    pub static_dir: PathBuf,
    pub server_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let server_addr = env::var("SERVER_ADDR")
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!("SERVER_ADDR {:?} is not a valid socket address, using default", raw);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5001)));

        let config = Self {
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .unwrap_or_else(|_| {
                    warn!("TWILIO_ACCOUNT_SID not set, using empty value");
                    String::new()
                }),
            twilio_api_key: env::var("TWILIO_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("TWILIO_API_KEY not set, using empty value");
                    String::new()
                }),
            twilio_api_secret: env::var("TWILIO_API_SECRET")
                .unwrap_or_else(|_| {
                    warn!("TWILIO_API_SECRET not set, using empty value");
                    String::new()
                }),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER")
                .unwrap_or_else(|_| {
                    warn!("TWILIO_PHONE_NUMBER not set, using empty value");
                    String::new()
                }),
            twilio_api_base_url: env::var("TWILIO_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TWILIO_API_BASE_URL.to_string()),
            frontend_public_url: env::var("FRONTEND_PUBLIC_URL")
                .unwrap_or_else(|_| {
                    warn!("FRONTEND_PUBLIC_URL not set, using default");
                    DEFAULT_FRONTEND_PUBLIC_URL.to_string()
                }),
            backend_public_url: env::var("BACKEND_PUBLIC_URL")
                .unwrap_or_else(|_| {
                    warn!("BACKEND_PUBLIC_URL not set, using default");
                    DEFAULT_BACKEND_PUBLIC_URL.to_string()
                }),
            office_callback_number: env::var("OFFICE_CALLBACK_NUMBER")
                .unwrap_or_else(|_| DEFAULT_OFFICE_CALLBACK_NUMBER.to_string()),
            default_provider_name: env::var("DEFAULT_PROVIDER_NAME")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_NAME.to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            server_addr,
        };

        if !config.is_messaging_configured() {
            warn!("Twilio messaging not fully configured - outbound SMS will fail");
        }

        config
    }

    pub fn is_messaging_configured(&self) -> bool {
        !self.twilio_account_sid.is_empty()
            && !self.twilio_api_key.is_empty()
            && !self.twilio_api_secret.is_empty()
            && !self.twilio_phone_number.is_empty()
    }

    /// Directory uploaded facility logos are written to.
    pub fn logo_upload_dir(&self) -> PathBuf {
        self.static_dir.join("logo_uploads")
    }

    /// Link a patient follows to pick a new appointment time.
    pub fn secure_link(&self, token: &str) -> String {
        format!(
            "{}/secure_link_page/?token={}",
            self.frontend_public_url.trim_end_matches('/'),
            urlencoding::encode(token)
        )
    }

    pub fn logo_url(&self, logo_filename: &str) -> String {
        format!(
            "{}/static/logo_uploads/{}",
            self.backend_public_url.trim_end_matches('/'),
            urlencoding::encode(logo_filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            twilio_account_sid: "AC123".to_string(),
            twilio_api_key: "SK123".to_string(),
            twilio_api_secret: "secret".to_string(),
            twilio_phone_number: "+15550000000".to_string(),
            twilio_api_base_url: DEFAULT_TWILIO_API_BASE_URL.to_string(),
            frontend_public_url: "https://clinic.example.com/".to_string(),
            backend_public_url: DEFAULT_BACKEND_PUBLIC_URL.to_string(),
            office_callback_number: DEFAULT_OFFICE_CALLBACK_NUMBER.to_string(),
            default_provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            static_dir: PathBuf::from("static"),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
        }
    }

    #[test]
    fn test_secure_link_strips_trailing_slash() {
        assert_eq!(
            config().secure_link("ab12cd34"),
            "https://clinic.example.com/secure_link_page/?token=ab12cd34"
        );
    }

    #[test]
    fn test_logo_url() {
        assert_eq!(
            config().logo_url("ab12cd34_logo.png"),
            "http://127.0.0.1:5001/static/logo_uploads/ab12cd34_logo.png"
        );
    }

    #[test]
    fn test_messaging_configured() {
        let mut config = config();
        assert!(config.is_messaging_configured());
        config.twilio_api_secret.clear();
        assert!(!config.is_messaging_configured());
    }
}
