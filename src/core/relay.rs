use crate::adapters::{TelegramNotifier, Web3FormsNotifier};
use crate::config::RelayConfig;
use crate::core::Notifier;
use crate::domain::model::{
    Channel, ContactResponse, ContactSubmission, DeliveryOutcome, HealthReport,
    NotificationReport, ServiceDescriptor,
};
use crate::utils::error::{RelayError, Result};
use reqwest::Client;
use std::sync::Arc;

pub const CONTACT_ENDPOINT: &str = "/api/contact";
pub const ACKNOWLEDGEMENT: &str = "Thank you! Your message has been sent.";

/// The contact relay: one optional notifier per channel. A channel without
/// credentials has no notifier, and submissions are refused until it does.
pub struct ContactRelay {
    service_name: String,
    frontend_url: String,
    telegram: Option<Arc<dyn Notifier>>,
    email: Option<Arc<dyn Notifier>>,
}

impl ContactRelay {
    pub fn new(
        service_name: impl Into<String>,
        frontend_url: impl Into<String>,
        telegram: Option<Arc<dyn Notifier>>,
        email: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            frontend_url: frontend_url.into(),
            telegram,
            email,
        }
    }

    /// Wires the real Telegram and Web3Forms notifiers over a shared client.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        let telegram = config.telegram_credentials().map(|credentials| {
            Arc::new(TelegramNotifier::new(
                client.clone(),
                config.telegram_api_base.clone(),
                credentials,
                config.request_timeout,
            )) as Arc<dyn Notifier>
        });

        let email = config.web3forms_credentials().map(|credentials| {
            Arc::new(Web3FormsNotifier::new(
                client.clone(),
                config.web3forms_endpoint.clone(),
                credentials,
                config.from_name.clone(),
                config.request_timeout,
            )) as Arc<dyn Notifier>
        });

        Ok(Self::new(
            config.service_name.clone(),
            config.frontend_url.clone(),
            telegram,
            email,
        ))
    }

    pub fn descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            service: self.service_name.clone(),
            status: "active".to_string(),
            frontend: self.frontend_url.clone(),
            endpoint: format!("{} (POST)", CONTACT_ENDPOINT),
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            telegram_configured: self.telegram.is_some(),
            web3forms_configured: self.email.is_some(),
        }
    }

    /// Relays one submission. Only missing credentials are errors; delivery
    /// failures show up as `failed` in the report and the call still succeeds.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<ContactResponse> {
        let telegram = self.telegram.as_ref().ok_or(RelayError::NotConfigured {
            channel: Channel::Telegram,
        })?;
        let email = self.email.as_ref().ok_or(RelayError::NotConfigured {
            channel: Channel::Email,
        })?;

        tracing::info!("📥 Contact submission received");

        // One channel after the other, chat first.
        let telegram_outcome = deliver(&**telegram, submission).await;
        let email_outcome = deliver(&**email, submission).await;

        tracing::info!(
            telegram = ?telegram_outcome,
            email = ?email_outcome,
            "📤 Contact submission relayed"
        );

        Ok(ContactResponse {
            success: true,
            message: ACKNOWLEDGEMENT.to_string(),
            notifications: NotificationReport {
                telegram: telegram_outcome,
                email: email_outcome,
            },
        })
    }
}

async fn deliver(notifier: &dyn Notifier, submission: &ContactSubmission) -> DeliveryOutcome {
    let outcome = notifier.notify(submission).await;
    tracing::debug!(channel = %notifier.channel(), outcome = ?outcome, "delivery finished");
    outcome
}
