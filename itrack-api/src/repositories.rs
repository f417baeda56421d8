use crate::endpoints::{
    AccessToken,
    authorization::Authorize,
    geofence::CreateGeofence,
    playback::Playback,
    track::Track,
};
use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct AuthorizationRepository;

impl AuthorizationRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn sign(
        &self,
        time: i64,
        account: impl Into<String>,
        signature: impl Into<String>,
    ) -> Authorize {
        Authorize::new(time, account, signature)
    }
}

#[derive(Default)]
pub struct TrackingRepository {
    access_token: AccessToken,
}

impl TrackingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, access_token: impl Into<AccessToken>) -> Self {
        self.access_token = access_token.into();
        self
    }

    pub fn track(&self, imei: impl Into<String>) -> Track {
        Track::new(imei).access_token(self.access_token.clone())
    }

    pub fn playback(
        &self,
        imei: impl Into<String>,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Playback {
        Playback::new(imei, begin, end).access_token(self.access_token.clone())
    }
}

#[derive(Default)]
pub struct GeofenceRepository {
    access_token: AccessToken,
}

impl GeofenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, access_token: impl Into<AccessToken>) -> Self {
        self.access_token = access_token.into();
        self
    }

    pub fn create(
        &self,
        imei: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> CreateGeofence {
        CreateGeofence::new(imei, name, longitude, latitude)
            .access_token(self.access_token.clone())
    }
}
