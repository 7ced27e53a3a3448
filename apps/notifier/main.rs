use anyhow::{Context, Result};
use dotenv::dotenv;
use notifier::{Notifier, NotifierConfig};
use tracing::{error, info};
use utils::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();

    let config = NotifierConfig::from_env().context("Failed to load notifier config")?;
    let notifier = Notifier::new(&config).context("Failed to initialize notifier")?;

    match notifier.run().await {
        Ok(summary) => {
            info!(
                fetched = summary.fetched,
                delivered = summary.published + summary.logged,
                watermark = summary.watermark,
                "Notifier finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Notifier run failed: {:?}", e);
            Err(e)
        }
    }
}
