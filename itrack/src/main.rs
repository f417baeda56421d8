use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

use itrack::background::Scheduler;
use itrack::config::Settings;
use itrack::logging::init_logging;
use itrack::store::JsonFileStore;
use itrack::TrackingClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let log_path = init_logging()?;
    tracing::info!(log = %log_path.display(), "itrack-sync starting");

    let settings = Settings::new()?;
    settings
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;
    tracing::info!("Configuration loaded successfully");

    let client = Arc::new(TrackingClient::from_settings(&settings));
    let store = Arc::new(JsonFileStore::new(settings.sync.store_path.clone()));
    let scheduler = Scheduler::new(
        client,
        store,
        Duration::from_secs(settings.sync.interval_secs),
    )
    .low_battery_threshold(settings.sync.low_battery_threshold);

    if settings.sync.run_once {
        let report = scheduler.run_once().await?;
        tracing::info!(
            synced = report.synced.len(),
            failed = report.failed.len(),
            "Single sync run finished"
        );
        return Ok(());
    }

    scheduler.run_until(tokio::signal::ctrl_c()).await;
    Ok(())
}
