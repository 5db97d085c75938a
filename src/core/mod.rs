pub mod relay;

pub use crate::domain::model::{ContactResponse, ContactSubmission, DeliveryOutcome};
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
