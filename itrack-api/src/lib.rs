pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::endpoints::{AccessToken, Envelope, VendorFailure};
pub use crate::error::ItrackApiError;
use repositories::*;
use std::time::Duration;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const BASE_URL: &str = "http://api.itrack.top/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin transport over the iTrack HTTP API.
///
/// Authentication is carried per request as an `access_token` query
/// parameter, so the client itself holds no credentials. Every call is
/// bounded by the configured timeout.
pub struct Client {
    inner: ApiClient,
    timeout: Duration,
}

impl Client {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url.trim_end_matches('/')),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ItrackApiError>
    where
        R: ApiRequest,
    {
        match tokio::time::timeout(self.timeout, self.inner.send(request)).await {
            Ok(result) => result.map_err(From::from),
            Err(_) => Err(ItrackApiError::Timeout(self.timeout)),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Request;

impl Request {
    pub fn authorization() -> AuthorizationRepository {
        AuthorizationRepository::new()
    }

    pub fn tracking() -> TrackingRepository {
        TrackingRepository::new()
    }

    pub fn geofences() -> GeofenceRepository {
        GeofenceRepository::new()
    }
}
