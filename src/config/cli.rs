use crate::config::toml_config::TomlConfig;
use crate::config::{
    RelayConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_FROM_NAME, DEFAULT_FRONTEND_URL, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_SERVICE_NAME, DEFAULT_TELEGRAM_API_BASE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WEB3FORMS_ENDPOINT,
};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command line, with every setting also readable from the environment.
///
/// Options are left unset rather than defaulted here so that a config file
/// can fill the gaps before the built-in defaults apply.
#[derive(Clone, Default, Parser)]
#[command(name = "contact-relay")]
#[command(about = "Relays portfolio contact-form submissions to Telegram and Web3Forms")]
pub struct CliConfig {
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "WEB3FORMS_ACCESS_KEY", hide_env_values = true)]
    pub web3forms_access_key: Option<String>,

    #[arg(long, env = "LISTEN_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "TELEGRAM_API_BASE")]
    pub telegram_api_base: Option<String>,

    #[arg(long, env = "WEB3FORMS_ENDPOINT")]
    pub web3forms_endpoint: Option<String>,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, env = "SERVICE_NAME")]
    pub service_name: Option<String>,

    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    #[arg(long, env = "FROM_NAME")]
    pub from_name: Option<String>,

    #[arg(long, env = "CONTACT_RELAY_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Loads the config file if one was given and merges it under the
    /// command-line values.
    pub fn resolve(&self) -> Result<RelayConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📄 Loading config file {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(self.merge(file))
    }

    pub fn merge(&self, file: TomlConfig) -> RelayConfig {
        let TomlConfig {
            server,
            telegram,
            web3forms,
            service,
        } = file;

        let allowed_origins = if !self.allowed_origins.is_empty() {
            self.allowed_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        } else {
            server.allowed_origins.unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|origin| origin.to_string())
                    .collect()
            })
        };

        let timeout_secs = self
            .request_timeout_secs
            .or(server.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        RelayConfig {
            host: pick(&self.host, server.host, DEFAULT_HOST),
            port: self.port.or(server.port).unwrap_or(DEFAULT_PORT),
            allowed_origins,
            telegram_bot_token: self.telegram_bot_token.clone().or(telegram.bot_token),
            telegram_chat_id: self.telegram_chat_id.clone().or(telegram.chat_id),
            telegram_api_base: pick(
                &self.telegram_api_base,
                telegram.api_base,
                DEFAULT_TELEGRAM_API_BASE,
            ),
            web3forms_access_key: self.web3forms_access_key.clone().or(web3forms.access_key),
            web3forms_endpoint: pick(
                &self.web3forms_endpoint,
                web3forms.endpoint,
                DEFAULT_WEB3FORMS_ENDPOINT,
            ),
            from_name: pick(&self.from_name, web3forms.from_name, DEFAULT_FROM_NAME),
            request_timeout: Duration::from_secs(timeout_secs),
            service_name: pick(&self.service_name, service.name, DEFAULT_SERVICE_NAME),
            frontend_url: pick(&self.frontend_url, service.frontend_url, DEFAULT_FRONTEND_URL),
        }
    }
}

fn pick(flag: &Option<String>, file: Option<String>, default: &str) -> String {
    flag.clone()
        .or(file)
        .unwrap_or_else(|| default.to_string())
}
