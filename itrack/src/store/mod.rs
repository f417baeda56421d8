//! Host-side persistence of vehicle records.
//!
//! The tracking client never writes here itself; the sync job loads the
//! device list from a store and saves each successful snapshot back.

mod file;

pub use file::JsonFileStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::TrackingSnapshot;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A fleet vehicle as kept by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, imei: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imei: imei.into(),
            tracking: None,
            synced_at: None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        !self.imei.trim().is_empty()
    }
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Vehicles that carry a non-empty IMEI, in store order.
    async fn tracked_vehicles(&self) -> Result<Vec<Vehicle>, StoreError>;

    async fn vehicle(&self, name: &str) -> Result<Vehicle, StoreError>;

    async fn save_snapshot(
        &self,
        name: &str,
        snapshot: &TrackingSnapshot,
    ) -> Result<(), StoreError>;
}
