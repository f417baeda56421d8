use thiserror::Error;

use crate::client::TrackingClient;
use crate::error::TrackingClientError;
use crate::snapshot::TrackingSnapshot;
use crate::store::{StoreError, VehicleStore};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("No IMEI found for vehicle {0}")]
    MissingImei(String),

    #[error(transparent)]
    Tracking(#[from] TrackingClientError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncedVehicle {
    pub name: String,
    pub snapshot: TrackingSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedVehicle {
    pub name: String,
    pub reason: String,
}

/// What one run of the vehicle sync job did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub synced: Vec<SyncedVehicle>,
    pub failed: Vec<FailedVehicle>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.synced.len() + self.failed.len()
    }
}

/// Syncs one vehicle record: fetch the snapshot for its IMEI and save it.
pub async fn sync_vehicle<S>(
    client: &TrackingClient,
    store: &S,
    name: &str,
) -> Result<TrackingSnapshot, SyncError>
where
    S: VehicleStore + ?Sized,
{
    let vehicle = store.vehicle(name).await?;
    if !vehicle.is_tracked() {
        return Err(SyncError::MissingImei(vehicle.name));
    }

    let snapshot = client.sync_one(&vehicle.imei).await?;
    store.save_snapshot(&vehicle.name, &snapshot).await?;
    tracing::info!(vehicle = %vehicle.name, imei = %vehicle.imei, "Vehicle synced");
    Ok(snapshot)
}

/// Syncs every tracked vehicle in the store.
///
/// Only failing to list the vehicles aborts the run. A vehicle whose
/// snapshot cannot be fetched or saved is logged and reported as failed.
pub async fn run_vehicle_sync<S>(client: &TrackingClient, store: &S) -> Result<SyncReport, SyncError>
where
    S: VehicleStore + ?Sized,
{
    let vehicles = store.tracked_vehicles().await?;
    tracing::info!(vehicles = vehicles.len(), "Starting vehicle sync");

    let imeis: Vec<String> = vehicles.iter().map(|v| v.imei.clone()).collect();
    let outcomes = client.sync_many(&imeis).await;

    let mut report = SyncReport::default();
    for (vehicle, outcome) in vehicles.into_iter().zip(outcomes) {
        match outcome.result {
            Ok(snapshot) => match store.save_snapshot(&vehicle.name, &snapshot).await {
                Ok(()) => report.synced.push(SyncedVehicle {
                    name: vehicle.name,
                    snapshot,
                }),
                Err(e) => {
                    tracing::error!(vehicle = %vehicle.name, "Vehicle Sync Failed: could not save snapshot: {}", e);
                    report.failed.push(FailedVehicle {
                        name: vehicle.name,
                        reason: e.to_string(),
                    });
                }
            },
            Err(e) => {
                tracing::error!(vehicle = %vehicle.name, imei = %vehicle.imei, "Vehicle Sync Failed: {}", e);
                report.failed.push(FailedVehicle {
                    name: vehicle.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        synced = report.synced.len(),
        failed = report.failed.len(),
        "Vehicle sync complete"
    );
    Ok(report)
}
