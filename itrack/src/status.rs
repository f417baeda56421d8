use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::snapshot::TrackingSnapshot;
use crate::sync::SyncOutcome;

/// Per-device line for fleet list views: where the device was last seen,
/// or why it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrackingStatus {
    Tracked {
        last_update: DateTime<Utc>,
        speed_kmh: i32,
        /// `"<latitude>, <longitude>"`
        location: String,
    },
    Error {
        error: String,
    },
}

impl TrackingStatus {
    pub fn is_tracked(&self) -> bool {
        matches!(self, TrackingStatus::Tracked { .. })
    }
}

impl From<&TrackingSnapshot> for TrackingStatus {
    fn from(snapshot: &TrackingSnapshot) -> Self {
        TrackingStatus::Tracked {
            last_update: snapshot.server_time.unwrap_or(snapshot.gps_time),
            speed_kmh: snapshot.speed_kmh,
            location: format!("{}, {}", snapshot.latitude, snapshot.longitude),
        }
    }
}

impl From<&SyncOutcome> for TrackingStatus {
    fn from(outcome: &SyncOutcome) -> Self {
        match &outcome.result {
            Ok(snapshot) => snapshot.into(),
            Err(e) => TrackingStatus::Error {
                error: e.to_string(),
            },
        }
    }
}

impl SyncOutcome {
    pub fn tracking_status(&self) -> TrackingStatus {
        self.into()
    }
}
