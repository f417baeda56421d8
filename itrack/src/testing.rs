use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::snapshot::TrackingSnapshot;
use crate::store::{StoreError, Vehicle, VehicleStore};

/// In-memory vehicle store for tests (no filesystem access)
///
/// Saves for vehicles registered with [`MemoryStore::fail_saves_for`]
/// return an IO error, to exercise per-vehicle failure handling.
#[derive(Default)]
pub struct MemoryStore {
    vehicles: Mutex<Vec<Vehicle>>,
    failing_saves: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Mutex::new(vehicles),
            failing_saves: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_saves_for(&self, name: &str) {
        self.failing_saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
    }

    /// Current state of a vehicle record
    pub fn get(&self, name: &str) -> Option<Vehicle> {
        self.vehicles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|v| v.name == name)
            .cloned()
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn tracked_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self
            .vehicles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|v| v.is_tracked())
            .cloned()
            .collect())
    }

    async fn vehicle(&self, name: &str) -> Result<Vehicle, StoreError> {
        self.get(name)
            .ok_or_else(|| StoreError::VehicleNotFound(name.to_string()))
    }

    async fn save_snapshot(
        &self,
        name: &str,
        snapshot: &TrackingSnapshot,
    ) -> Result<(), StoreError> {
        if self
            .failing_saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
        {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }

        let mut vehicles = self.vehicles.lock().unwrap_or_else(PoisonError::into_inner);
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| StoreError::VehicleNotFound(name.to_string()))?;
        vehicle.tracking = Some(snapshot.clone());
        vehicle.synced_at = Some(Utc::now());
        Ok(())
    }
}
