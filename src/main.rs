use clap::Parser;
use contact_relay::utils::{logger, validation::Validate};
use contact_relay::{server, CliConfig, ContactRelay, RelayConfig, Result};
use std::sync::Arc;

fn load_config(cli: &CliConfig) -> Result<RelayConfig> {
    let config = cli.resolve()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env has to be loaded before clap reads the environment
    let dotenv_path = dotenv::dotenv().ok();
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting contact-relay");
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        tracing::debug!("Relay config: {:?}", config);
    }

    let relay = Arc::new(ContactRelay::from_config(&config)?);
    let health = relay.health();
    tracing::info!(
        telegram_configured = health.telegram_configured,
        web3forms_configured = health.web3forms_configured,
        "📋 Notification channels"
    );

    let app = server::router(relay, &config)?;
    server::serve(&config, app).await?;

    Ok(())
}
