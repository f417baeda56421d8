use itrack_api::endpoints::geofence::DEFAULT_RADIUS_METERS;
use serde::{Deserialize, Serialize};

/// When the vendor raises an alarm for a fence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmType {
    /// Leaving the fence
    #[default]
    Out,
    /// Entering the fence
    In,
    InOut,
}

impl AlarmType {
    pub fn code(self) -> u8 {
        match self {
            AlarmType::Out => 0,
            AlarmType::In => 1,
            AlarmType::InOut => 2,
        }
    }
}

/// A circular fence to create around a point for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    pub imei: String,
    pub name: String,
    #[serde(default)]
    pub alarm_type: AlarmType,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default = "default_radius")]
    pub radius_m: u32,
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS_METERS
}

impl GeofenceConfig {
    pub fn new(
        imei: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            imei: imei.into(),
            name: name.into(),
            alarm_type: AlarmType::default(),
            longitude,
            latitude,
            radius_m: DEFAULT_RADIUS_METERS,
        }
    }

    pub fn alarm_type(mut self, alarm_type: AlarmType) -> Self {
        self.alarm_type = alarm_type;
        self
    }

    pub fn radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }
}
