use crate::background::vehicle_sync::SyncReport;

/// A vehicle whose battery dropped below the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowBatteryAlert {
    pub vehicle: String,
    pub battery_pct: i32,
}

impl std::fmt::Display for LowBatteryAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} has low battery ({}%)",
            self.vehicle, self.battery_pct
        )
    }
}

pub fn low_battery_alerts(report: &SyncReport, threshold: i32) -> Vec<LowBatteryAlert> {
    report
        .synced
        .iter()
        .filter(|v| v.snapshot.battery_pct < threshold)
        .map(|v| LowBatteryAlert {
            vehicle: v.name.clone(),
            battery_pct: v.snapshot.battery_pct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::vehicle_sync::{FailedVehicle, SyncedVehicle};
    use crate::snapshot::{TrackingSnapshot, TriState};
    use chrono::Utc;

    fn synced(name: &str, battery_pct: i32) -> SyncedVehicle {
        SyncedVehicle {
            name: name.to_string(),
            snapshot: TrackingSnapshot {
                imei: format!("imei-{}", name),
                gps_time: Utc::now(),
                server_time: None,
                longitude: 0.0,
                latitude: 0.0,
                speed_kmh: 0,
                course: 0,
                battery_pct,
                acc: TriState::Off,
                door: TriState::Unknown,
                defense: TriState::Unknown,
            },
        }
    }

    #[test]
    fn flags_only_vehicles_below_threshold() {
        let report = SyncReport {
            synced: vec![synced("truck-1", 19), synced("truck-2", 20), synced("van-7", 3)],
            failed: vec![FailedVehicle {
                name: "truck-9".into(),
                reason: "offline".into(),
            }],
        };

        let alerts = low_battery_alerts(&report, 20);

        assert_eq!(
            alerts,
            vec![
                LowBatteryAlert {
                    vehicle: "truck-1".into(),
                    battery_pct: 19
                },
                LowBatteryAlert {
                    vehicle: "van-7".into(),
                    battery_pct: 3
                },
            ]
        );
        assert_eq!(
            alerts[0].to_string(),
            "Vehicle truck-1 has low battery (19%)"
        );
    }

    #[test]
    fn empty_report_has_no_alerts() {
        assert!(low_battery_alerts(&SyncReport::default(), 20).is_empty());
    }
}
