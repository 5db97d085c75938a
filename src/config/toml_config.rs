use crate::utils::error::{RelayError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional config file. Every field may be omitted; command-line flags and
/// environment variables take precedence over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub telegram: TelegramSection,
    pub web3forms: Web3FormsSection,
    pub service: ServiceSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramSection {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Web3FormsSection {
    pub access_key: Option<String>,
    pub endpoint: Option<String>,
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSection {
    pub name: Option<String>,
    pub frontend_url: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables become
    /// empty strings, so a credential that references one counts as absent.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| {
                    tracing::warn!("⚠️ Config file references unset variable {}", var_name);
                    String::new()
                })
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "127.0.0.1"
port = 9000
allowed_origins = ["https://example.com"]
request_timeout_secs = 3

[telegram]
bot_token = "123:abc"
chat_id = "42"

[web3forms]
access_key = "key"
from_name = "Site Form"

[service]
name = "Example Contact API"
frontend_url = "https://example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.server.request_timeout_secs, Some(3));
        assert_eq!(config.telegram.chat_id.as_deref(), Some("42"));
        assert_eq!(config.web3forms.from_name.as_deref(), Some("Site Form"));
        assert!(config.telegram.api_base.is_none());
        assert_eq!(config.service.name.as_deref(), Some("Example Contact API"));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.port.is_none());
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CONTACT_RELAY_TEST_ACCESS_KEY", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[web3forms]
access_key = "${CONTACT_RELAY_TEST_ACCESS_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.web3forms.access_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_unset_variable_becomes_empty() {
        let config = TomlConfig::from_toml_str(
            r#"
[telegram]
bot_token = "${CONTACT_RELAY_TEST_DEFINITELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = TomlConfig::from_toml_str("[server]\nprot = 8000\n");
        assert!(matches!(
            result,
            Err(RelayError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8123").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, Some(8123));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/nonexistent/contact-relay.toml");
        assert!(matches!(result, Err(RelayError::IoError(_))));
    }
}
