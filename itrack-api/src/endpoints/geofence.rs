use super::{AccessToken, Envelope};
use crate::macros::setter;
use serde::Serialize;
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

pub const DEFAULT_RADIUS_METERS: u32 = 300;

// Requests

/// Creates a circular fence around a point.
///
/// The vendor does not deduplicate: sending the same request twice creates
/// two fences.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGeofence {
    access_token: AccessToken,
    imei: String,
    efencename: String,
    /// 0 out, 1 in, 2 in/out
    alarmtype: u8,
    longitude: f64,
    latitude: f64,
    /// Meters
    radius: u32,
}

impl CreateGeofence {
    pub fn new(
        imei: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            access_token: AccessToken::default(),
            imei: imei.into(),
            efencename: name.into(),
            alarmtype: 0,
            longitude,
            latitude,
            radius: DEFAULT_RADIUS_METERS,
        }
    }

    setter!(access_token: AccessToken);
    setter!(alarmtype: u8);
    setter!(radius: u32);
}

impl Request for CreateGeofence {
    type Data = Self;
    type Response = CreateGeofenceResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/geofence/create".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

pub type CreateGeofenceResponse = Envelope<serde_json::Value>;
