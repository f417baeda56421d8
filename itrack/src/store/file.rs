use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{StoreError, Vehicle, VehicleStore};
use crate::snapshot::TrackingSnapshot;

/// Vehicles kept as a pretty-printed JSON array on disk.
///
/// Writes go to a sibling temp file that is renamed over the original, so a
/// crash mid-write leaves the previous contents intact.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty fleet.
    pub async fn load(&self) -> Result<Vec<Vehicle>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, vehicles: &[Vehicle]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(vehicles).await
    }

    async fn write(&self, vehicles: &[Vehicle]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(vehicles)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl VehicleStore for JsonFileStore {
    async fn tracked_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(Vehicle::is_tracked)
            .collect())
    }

    async fn vehicle(&self, name: &str) -> Result<Vehicle, StoreError> {
        self.load()
            .await?
            .into_iter()
            .find(|v| v.name == name)
            .ok_or_else(|| StoreError::VehicleNotFound(name.to_string()))
    }

    async fn save_snapshot(
        &self,
        name: &str,
        snapshot: &TrackingSnapshot,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut vehicles = self.load().await?;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| StoreError::VehicleNotFound(name.to_string()))?;

        vehicle.tracking = Some(snapshot.clone());
        vehicle.synced_at = Some(Utc::now());
        self.write(&vehicles).await?;

        tracing::debug!(vehicle = %name, path = %self.path.display(), "Saved vehicle snapshot");
        Ok(())
    }
}
