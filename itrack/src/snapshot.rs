use chrono::{DateTime, Utc};
use itrack_api::endpoints::track::TrackRecord;
use serde::{Deserialize, Serialize};

use crate::error::TrackingClientError;

/// Vendor status flag: 1 on, 0 off, anything else (usually -1) unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    On,
    Off,
    Unknown,
}

impl TriState {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => TriState::On,
            Some(0) => TriState::Off,
            _ => TriState::Unknown,
        }
    }

    pub fn as_code(self) -> i8 {
        match self {
            TriState::On => 1,
            TriState::Off => 0,
            TriState::Unknown => -1,
        }
    }
}

/// Latest known position and status of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub imei: String,
    pub gps_time: DateTime<Utc>,
    /// When the vendor received the fix, if it said so
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<DateTime<Utc>>,
    pub longitude: f64,
    pub latitude: f64,
    pub speed_kmh: i32,
    pub course: i32,
    pub battery_pct: i32,
    pub acc: TriState,
    pub door: TriState,
    pub defense: TriState,
}

impl TrackingSnapshot {
    /// Validates a raw `/track` record.
    ///
    /// Missing measurements are rejected rather than defaulted. Missing
    /// status flags map to [`TriState::Unknown`], which is the vendor's own
    /// "no status" value.
    pub fn from_record(imei: &str, record: TrackRecord) -> Result<Self, TrackingClientError> {
        let gps_time = require(imei, "gpstime", record.gpstime)?;
        let gps_time = DateTime::from_timestamp(gps_time, 0).ok_or_else(|| {
            TrackingClientError::Tracking(format!(
                "Invalid gpstime {} for device {}",
                gps_time, imei
            ))
        })?;

        Ok(Self {
            imei: record
                .imei
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| imei.to_string()),
            gps_time,
            server_time: record
                .servertime
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            longitude: require(imei, "longitude", record.longitude)?,
            latitude: require(imei, "latitude", record.latitude)?,
            speed_kmh: int_field(imei, "speed", record.speed)?,
            course: int_field(imei, "course", record.course)?,
            battery_pct: int_field(imei, "battery", record.battery)?,
            acc: TriState::from_code(record.accstatus),
            door: TriState::from_code(record.doorstatus),
            defense: TriState::from_code(record.defencestatus),
        })
    }
}

fn require<T>(imei: &str, field: &str, value: Option<T>) -> Result<T, TrackingClientError> {
    value.ok_or_else(|| {
        TrackingClientError::Tracking(format!(
            "Vendor record for device {} is missing '{}'",
            imei, field
        ))
    })
}

fn int_field(imei: &str, field: &str, value: Option<i64>) -> Result<i32, TrackingClientError> {
    let value = require(imei, field, value)?;
    i32::try_from(value).map_err(|_| {
        TrackingClientError::Tracking(format!(
            "Value {} of '{}' for device {} is out of range",
            value, field, imei
        ))
    })
}
