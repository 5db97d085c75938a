use crate::config::Web3FormsCredentials;
use crate::domain::model::{Channel, ContactSubmission, DeliveryOutcome};
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SubmitForm<'a> {
    access_key: &'a str,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    from_name: &'a str,
}

/// Forwards submissions to Web3Forms, which turns them into an email.
pub struct Web3FormsNotifier {
    client: Client,
    endpoint: String,
    credentials: Web3FormsCredentials,
    from_name: String,
    timeout: Duration,
}

impl Web3FormsNotifier {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        credentials: Web3FormsCredentials,
        from_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
            from_name: from_name.into(),
            timeout,
        }
    }

    async fn send(&self, submission: &ContactSubmission) -> Result<StatusCode, reqwest::Error> {
        let form = SubmitForm {
            access_key: &self.credentials.access_key,
            name: &submission.name,
            email: &submission.email,
            subject: &submission.subject,
            message: &submission.message,
            from_name: &self.from_name,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .timeout(self.timeout)
            .send()
            .await?;

        Ok(response.status())
    }
}

#[async_trait]
impl Notifier for Web3FormsNotifier {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn notify(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        match self.send(submission).await {
            Ok(status) if status == StatusCode::OK => {
                tracing::info!("📧 Web3Forms submission accepted");
                DeliveryOutcome::Sent
            }
            Ok(status) => {
                tracing::warn!("Web3Forms answered {}", status);
                DeliveryOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Web3Forms request failed: {}", e);
                DeliveryOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Nice site & all".to_string(),
        }
    }

    fn notifier(endpoint: String, timeout: Duration) -> Web3FormsNotifier {
        Web3FormsNotifier::new(
            Client::new(),
            endpoint,
            Web3FormsCredentials {
                access_key: "key-1".to_string(),
            },
            "Portfolio Contact Form",
            timeout,
        )
    }

    #[tokio::test]
    async fn test_posts_url_encoded_form() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/submit")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_contains("access_key=key-1")
                    .body_contains("name=Ada+Lovelace")
                    .body_contains("email=ada%40example.com")
                    .body_contains("subject=Hello")
                    .body_contains("message=Nice+site+%26+all")
                    .body_contains("from_name=Portfolio+Contact+Form");
                then.status(200).json_body(serde_json::json!({"success": true}));
            })
            .await;

        let outcome = notifier(server.url("/submit"), Duration::from_secs(5))
            .notify(&submission())
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, DeliveryOutcome::Sent);
    }

    #[tokio::test]
    async fn test_failed_on_server_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(500);
            })
            .await;

        let outcome = notifier(server.url("/submit"), Duration::from_secs(5))
            .notify(&submission())
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }

    #[tokio::test]
    async fn test_failed_on_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(200).delay(Duration::from_secs(2));
            })
            .await;

        let outcome = notifier(server.url("/submit"), Duration::from_millis(200))
            .notify(&submission())
            .await;
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }
}
