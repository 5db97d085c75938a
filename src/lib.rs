pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{cli::CliConfig, toml_config::TomlConfig, RelayConfig};
pub use core::relay::ContactRelay;
pub use domain::model::{ContactResponse, ContactSubmission, DeliveryOutcome};
pub use utils::error::{RelayError, Result};
