pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origin, validate_positive_number, validate_range,
    validate_url, Validate,
};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_WEB3FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_SERVICE_NAME: &str = "Jagrav Portfolio Contact API";
pub const DEFAULT_FRONTEND_URL: &str = "https://jagravportfolio.netlify.app";
pub const DEFAULT_FROM_NAME: &str = "Portfolio Contact Form";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://jagravportfolio.netlify.app",
    "http://localhost:3000",
    "http://localhost:5173",
];

const MAX_TIMEOUT_MS: u64 = 60_000;

/// Process-wide configuration. Built once in `main` and shared read-only.
#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
    pub web3forms_access_key: Option<String>,
    pub web3forms_endpoint: String,
    pub from_name: String,
    pub request_timeout: Duration,
    pub service_name: String,
    pub frontend_url: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Web3FormsCredentials {
    pub access_key: String,
}

// Secrets never reach the logs, even at debug level.
impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl fmt::Debug for Web3FormsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Web3FormsCredentials")
            .field("access_key", &"***")
            .finish()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl RelayConfig {
    /// Both the bot token and the chat id, or nothing.
    pub fn telegram_credentials(&self) -> Option<TelegramCredentials> {
        let bot_token = present(&self.telegram_bot_token)?;
        let chat_id = present(&self.telegram_chat_id)?;
        Some(TelegramCredentials {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    pub fn web3forms_credentials(&self) -> Option<Web3FormsCredentials> {
        present(&self.web3forms_access_key).map(|key| Web3FormsCredentials {
            access_key: key.to_string(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            web3forms_access_key: None,
            web3forms_endpoint: DEFAULT_WEB3FORMS_ENDPOINT.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("telegram", &self.telegram_credentials())
            .field("telegram_api_base", &self.telegram_api_base)
            .field("web3forms", &self.web3forms_credentials())
            .field("web3forms_endpoint", &self.web3forms_endpoint)
            .field("from_name", &self.from_name)
            .field("request_timeout", &self.request_timeout)
            .field("service_name", &self.service_name)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_positive_number("port", u64::from(self.port), 1)?;

        for origin in &self.allowed_origins {
            validate_origin("allowed_origins", origin)?;
        }

        validate_url("telegram_api_base", &self.telegram_api_base)?;
        validate_url("web3forms_endpoint", &self.web3forms_endpoint)?;
        validate_url("frontend_url", &self.frontend_url)?;

        let timeout_ms = u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX);
        validate_range("request_timeout_ms", timeout_ms, 1, MAX_TIMEOUT_MS)?;

        validate_non_empty_string("service_name", &self.service_name)?;
        validate_non_empty_string("from_name", &self.from_name)?;

        // Missing credentials are reported by /health, not refused at startup.
        if self.telegram_credentials().is_none() {
            tracing::warn!("⚠️ Telegram credentials missing, /api/contact will answer 500");
        }
        if self.web3forms_credentials().is_none() {
            tracing::warn!("⚠️ Web3Forms access key missing, /api/contact will answer 500");
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
