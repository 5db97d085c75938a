// Adapters layer: outbound notification channels.

pub mod telegram;
pub mod web3forms;

pub use telegram::TelegramNotifier;
pub use web3forms::Web3FormsNotifier;
