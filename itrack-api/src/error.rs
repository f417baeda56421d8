use std::time::Duration;
use tower_api_client::{Error as ApiError, StatusCode};

/// Failure to obtain a vendor response at all.
///
/// Vendor-level rejections travel inside a successful HTTP response (see
/// [`crate::Envelope`]) and are not represented here.
#[derive(Debug)]
pub enum ItrackApiError {
    Http(StatusCode, String),
    Timeout(Duration),
    Internal(ApiError),
}

impl From<ApiError> for ItrackApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                ItrackApiError::Http(status, detail)
            }
            e => ItrackApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for ItrackApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItrackApiError::Http(status, detail) if detail.is_empty() => {
                write!(f, "HTTP {}", status)
            }
            ItrackApiError::Http(status, detail) => write!(f, "HTTP {}: {}", status, detail),
            ItrackApiError::Timeout(timeout) => {
                write!(f, "request timed out after {}ms", timeout.as_millis())
            }
            ItrackApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ItrackApiError {}
