use crate::domain::model::{Channel, ContactSubmission, DeliveryOutcome};
use async_trait::async_trait;

/// An outbound notification channel.
///
/// Implementations never return an error: every transport or remote failure
/// is folded into [`DeliveryOutcome::Failed`] and logged where it happens.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> Channel;

    async fn notify(&self, submission: &ContactSubmission) -> DeliveryOutcome;
}
