use crate::config::TelegramCredentials;
use crate::domain::model::{Channel, ContactSubmission, DeliveryOutcome};
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

/// Sends each submission as a Markdown message through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    credentials: TelegramCredentials,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        credentials: TelegramCredentials,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            credentials,
            timeout,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.credentials.bot_token
        )
    }

    async fn send(&self, submission: &ContactSubmission) -> Result<StatusCode, reqwest::Error> {
        let body = SendMessage {
            chat_id: &self.credentials.chat_id,
            text: format_message(submission),
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        Ok(response.status())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> Channel {
        Channel::Telegram
    }

    async fn notify(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        match self.send(submission).await {
            Ok(status) if status == StatusCode::OK => {
                tracing::info!("📨 Telegram notification sent");
                DeliveryOutcome::Sent
            }
            Ok(status) => {
                tracing::warn!("Telegram API answered {}", status);
                DeliveryOutcome::Failed
            }
            Err(e) => {
                // reqwest errors carry the URL, which contains the bot token
                tracing::warn!("Telegram request failed: {}", e.without_url());
                DeliveryOutcome::Failed
            }
        }
    }
}

/// Renders the chat message. Field values are embedded as-is.
pub fn format_message(submission: &ContactSubmission) -> String {
    format!(
        "\n📨 *New Message from Portfolio*\n\
         \n\
         👤 *Name:* {}\n\
         📧 *Email:* {}\n\
         🎯 *Subject:* {}\n\
         📝 *Message:*\n\
         {}\n",
        submission.name, submission.email, submission.subject, submission.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            subject: "S".to_string(),
            message: "M".to_string(),
        }
    }

    fn notifier(api_base: String, timeout: Duration) -> TelegramNotifier {
        TelegramNotifier::new(
            Client::new(),
            api_base,
            TelegramCredentials {
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
            },
            timeout,
        )
    }

    #[test]
    fn test_format_message() {
        let text = format_message(&submission());
        assert_eq!(
            text,
            "\n📨 *New Message from Portfolio*\n\n👤 *Name:* A\n📧 *Email:* a@b.com\n🎯 *Subject:* S\n📝 *Message:*\nM\n"
        );
    }

    #[test]
    fn test_url_ignores_trailing_slash() {
        let telegram = notifier("https://api.telegram.org/".to_string(), Duration::from_secs(5));
        assert_eq!(
            telegram.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_sent_on_200() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/bot123:abc/sendMessage")
                    .json_body(serde_json::json!({
                        "chat_id": "42",
                        "text": format_message(&submission()),
                        "parse_mode": "Markdown"
                    }));
                then.status(200).json_body(serde_json::json!({"ok": true}));
            })
            .await;

        let outcome = notifier(server.base_url(), Duration::from_secs(5))
            .notify(&submission())
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, DeliveryOutcome::Sent);
    }

    #[tokio::test]
    async fn test_failed_on_non_200() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(401)
                    .json_body(serde_json::json!({"ok": false, "description": "Unauthorized"}));
            })
            .await;

        let outcome = notifier(server.base_url(), Duration::from_secs(5))
            .notify(&submission())
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }

    #[tokio::test]
    async fn test_other_success_codes_are_failures() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(202);
            })
            .await;

        let outcome = notifier(server.base_url(), Duration::from_secs(5))
            .notify(&submission())
            .await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }

    #[tokio::test]
    async fn test_failed_on_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(200).delay(Duration::from_secs(2));
            })
            .await;

        let outcome = notifier(server.base_url(), Duration::from_millis(200))
            .notify(&submission())
            .await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }

    #[tokio::test]
    async fn test_failed_when_unreachable() {
        let outcome = notifier("http://127.0.0.1:1".to_string(), Duration::from_secs(1))
            .notify(&submission())
            .await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }
}
