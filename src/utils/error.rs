use crate::domain::model::Channel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{} not configured", .channel.service_label())]
    NotConfigured { channel: Channel },

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration file error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl RelayError {
    /// Errors the operator has to fix in the deployment, as opposed to
    /// runtime faults.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RelayError::NotConfigured { .. }
                | RelayError::InvalidConfigValueError { .. }
                | RelayError::ConfigValidationError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_messages() {
        let telegram = RelayError::NotConfigured {
            channel: Channel::Telegram,
        };
        assert_eq!(telegram.to_string(), "Telegram not configured");

        let email = RelayError::NotConfigured {
            channel: Channel::Email,
        };
        assert_eq!(email.to_string(), "Email service not configured");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(RelayError::NotConfigured {
            channel: Channel::Email
        }
        .is_configuration());
        assert!(RelayError::InvalidConfigValueError {
            field: "port".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        }
        .is_configuration());

        let io = RelayError::IoError(std::io::Error::other("boom"));
        assert!(!io.is_configuration());
    }
}
