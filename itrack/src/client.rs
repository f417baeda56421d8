use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use itrack_api::Request;
use itrack_auth::{Credential, TokenManager, TokenState};

use crate::config::Settings;
use crate::error::TrackingClientError;
use crate::geofence::GeofenceConfig;
use crate::history::History;
use crate::snapshot::TrackingSnapshot;

/// Authenticated reads and writes against the iTrack API.
///
/// Every call obtains a token from the shared [`TokenManager`] first, so the
/// client can be used from many tasks at once.
pub struct TrackingClient {
    api: Arc<itrack_api::Client>,
    tokens: TokenManager<Arc<itrack_api::Client>>,
    pub(crate) concurrency: usize,
}

pub struct TrackingClientBuilder {
    credential: Credential,
    base_url: String,
    timeout: Duration,
    concurrency: usize,
}

impl TrackingClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Maximum number of snapshot requests in flight during a batch sync.
    /// Values below 1 are treated as 1.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn build(self) -> TrackingClient {
        let api = Arc::new(itrack_api::Client::with_base_url(&self.base_url).timeout(self.timeout));
        TrackingClient {
            tokens: TokenManager::new(self.credential, api.clone()),
            api,
            concurrency: self.concurrency,
        }
    }
}

impl TrackingClient {
    pub fn builder(credential: Credential) -> TrackingClientBuilder {
        TrackingClientBuilder {
            credential,
            base_url: itrack_api::BASE_URL.to_string(),
            timeout: itrack_api::DEFAULT_TIMEOUT,
            concurrency: 1,
        }
    }

    pub fn new(credential: Credential) -> Self {
        Self::builder(credential).build()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::builder(settings.vendor.credential())
            .base_url(settings.vendor.base_url.clone())
            .timeout(Duration::from_secs(settings.vendor.request_timeout_secs))
            .concurrency(settings.sync.concurrency)
            .build()
    }

    pub fn account(&self) -> &str {
        self.tokens.account()
    }

    pub async fn token_state(&self) -> TokenState {
        self.tokens.state_at(Utc::now()).await
    }

    /// Latest position and status of one device.
    pub async fn snapshot(&self, imei: &str) -> Result<TrackingSnapshot, TrackingClientError> {
        let imei = require_imei(imei)?;
        let token = self.tokens.token().await?;

        tracing::debug!(imei = %imei, "Fetching vehicle snapshot");
        let req = Request::tracking().with_token(token.expose()).track(imei);
        let records = self
            .api
            .send(req)
            .await?
            .into_record()
            .map_err(|failure| {
                TrackingClientError::Tracking(failure.describe("Failed to track vehicle"))
            })?;

        let record = records.into_iter().next().ok_or_else(|| {
            TrackingClientError::Tracking(format!(
                "Failed to track vehicle: no record returned for device {}",
                imei
            ))
        })?;

        TrackingSnapshot::from_record(imei, record)
    }

    /// Positions recorded between `start` and `end`, in vendor order.
    pub async fn history(
        &self,
        imei: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<History, TrackingClientError> {
        let imei = require_imei(imei)?;
        if end < start {
            return Err(TrackingClientError::Tracking(format!(
                "Playback window ends ({}) before it starts ({})",
                end, start
            )));
        }
        let token = self.tokens.token().await?;

        tracing::debug!(imei = %imei, %start, %end, "Fetching vehicle history");
        let req = Request::tracking()
            .with_token(token.expose())
            .playback(imei, start, end);
        let raw = self
            .api
            .send(req)
            .await?
            .into_record()
            .map_err(|failure| {
                TrackingClientError::Tracking(failure.describe("Failed to get vehicle history"))
            })?;

        let history = History::parse(&raw).map_err(|(index, e)| {
            TrackingClientError::Tracking(format!(
                "Failed to get vehicle history: malformed playback record {} for device {}: {}",
                index, imei, e
            ))
        })?;
        tracing::debug!(imei = %imei, points = history.len(), "Parsed vehicle history");
        Ok(history)
    }

    /// Creates a fence on the vendor side.
    ///
    /// Not idempotent: the vendor creates a new fence on every call.
    pub async fn create_geofence(
        &self,
        config: &GeofenceConfig,
    ) -> Result<(), TrackingClientError> {
        let imei = require_imei(&config.imei)?;
        let token = self.tokens.token().await?;

        tracing::info!(imei = %imei, name = %config.name, radius_m = config.radius_m, "Creating geofence");
        let req = Request::geofences()
            .with_token(token.expose())
            .create(imei, config.name.clone(), config.longitude, config.latitude)
            .alarmtype(config.alarm_type.code())
            .radius(config.radius_m);

        self.api.send(req).await?.check().map_err(|failure| {
            TrackingClientError::Geofence(failure.describe("Failed to create geofence"))
        })
    }
}

fn require_imei(imei: &str) -> Result<&str, TrackingClientError> {
    let imei = imei.trim();
    if imei.is_empty() {
        return Err(TrackingClientError::Tracking(
            "Device identifier is empty".to_string(),
        ));
    }
    Ok(imei)
}
