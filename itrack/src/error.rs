use itrack_auth::AuthError;
use thiserror::Error;

/// Failure of a single vendor operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackingClientError {
    /// The vendor rejected the credentials or the signature.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The vendor rejected a snapshot/playback read or returned data that
    /// does not have the expected shape.
    #[error("Tracking error: {0}")]
    Tracking(String),

    /// The vendor rejected a geofence write.
    #[error("Geofence error: {0}")]
    Geofence(String),

    /// No vendor response was obtained (network, HTTP status, timeout).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl TrackingClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<AuthError> for TrackingClientError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Authentication(msg) => Self::Authentication(msg),
            AuthError::Transport(msg) => Self::Transport(msg),
        }
    }
}

impl From<itrack_api::ItrackApiError> for TrackingClientError {
    fn from(err: itrack_api::ItrackApiError) -> Self {
        Self::Transport(err.to_string())
    }
}
