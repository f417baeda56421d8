pub mod vehicle_sync;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::alerts::low_battery_alerts;
use crate::client::TrackingClient;
use crate::store::VehicleStore;
use vehicle_sync::{run_vehicle_sync, SyncError, SyncReport};

/// Runs the vehicle sync job on a fixed interval.
pub struct Scheduler<S: ?Sized> {
    client: Arc<TrackingClient>,
    store: Arc<S>,
    interval: Duration,
    low_battery_threshold: i32,
}

impl<S> Scheduler<S>
where
    S: VehicleStore + ?Sized,
{
    pub fn new(client: Arc<TrackingClient>, store: Arc<S>, interval: Duration) -> Self {
        Self {
            client,
            store,
            interval,
            low_battery_threshold: 20,
        }
    }

    pub fn low_battery_threshold(mut self, threshold: i32) -> Self {
        self.low_battery_threshold = threshold;
        self
    }

    /// One job run followed by alert evaluation.
    pub async fn run_once(&self) -> Result<SyncReport, SyncError> {
        let report = run_vehicle_sync(&self.client, self.store.as_ref()).await?;

        for alert in low_battery_alerts(&report, self.low_battery_threshold) {
            tracing::warn!(vehicle = %alert.vehicle, battery_pct = alert.battery_pct, "{}", alert);
        }
        Ok(report)
    }

    /// Runs the job immediately and then every interval until `shutdown`
    /// resolves. A failed run is logged and the next tick proceeds.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future,
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(interval_secs = self.interval.as_secs(), "Scheduler started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!("Vehicle sync run failed: {}", e);
                    }
                }
            }
        }
    }
}
