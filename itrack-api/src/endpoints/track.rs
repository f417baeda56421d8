use super::{AccessToken, Envelope, lenient_f64, lenient_i64};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

/// One device position as reported by `/track`.
///
/// Every field is optional on the wire; deciding what a missing value
/// means is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(default)]
    pub imei: Option<String>,
    /// Unix seconds of the GPS fix
    #[serde(default, deserialize_with = "lenient_i64")]
    pub gpstime: Option<i64>,
    /// Unix seconds at which the vendor received the fix
    #[serde(default, deserialize_with = "lenient_i64")]
    pub servertime: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    /// km/h
    #[serde(default, deserialize_with = "lenient_i64")]
    pub speed: Option<i64>,
    /// Heading in degrees, 0 is north
    #[serde(default, deserialize_with = "lenient_i64")]
    pub course: Option<i64>,
    /// Battery level in percent
    #[serde(default, deserialize_with = "lenient_i64")]
    pub battery: Option<i64>,
    /// 1 on, 0 off, -1 no status
    #[serde(default, deserialize_with = "lenient_i64")]
    pub accstatus: Option<i64>,
    /// 1 open, 0 closed, -1 no status
    #[serde(default, deserialize_with = "lenient_i64")]
    pub doorstatus: Option<i64>,
    /// 1 armed, 0 disarmed, -1 no status
    #[serde(default, deserialize_with = "lenient_i64")]
    pub defencestatus: Option<i64>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    access_token: AccessToken,
    /// Comma separated list; this crate always sends a single IMEI.
    imeis: String,
}

impl Track {
    pub fn new(imei: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::default(),
            imeis: imei.into(),
        }
    }

    setter!(access_token: AccessToken);
}

impl Request for Track {
    type Data = Self;
    type Response = TrackResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/track".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

pub type TrackResponse = Envelope<Vec<TrackRecord>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numbers_encoded_as_strings() {
        let record: TrackRecord = serde_json::from_value(json!({
            "imei": "868120145233604",
            "gpstime": "1700000000",
            "longitude": "113.943",
            "latitude": 22.54,
            "speed": 42,
            "course": "90",
            "battery": 87,
            "accstatus": 1,
            "doorstatus": -1,
            "defencestatus": "0"
        }))
        .unwrap();

        assert_eq!(record.gpstime, Some(1_700_000_000));
        assert_eq!(record.longitude, Some(113.943));
        assert_eq!(record.latitude, Some(22.54));
        assert_eq!(record.course, Some(90));
        assert_eq!(record.doorstatus, Some(-1));
        assert_eq!(record.defencestatus, Some(0));
    }

    #[test]
    fn missing_and_blank_fields_are_none() {
        let record: TrackRecord =
            serde_json::from_value(json!({"imei": "1", "speed": "", "battery": null})).unwrap();
        assert_eq!(record.speed, None);
        assert_eq!(record.battery, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn rejects_garbage_numbers() {
        let result = serde_json::from_value::<TrackRecord>(json!({"speed": "fast"}));
        assert!(result.is_err());
    }
}
