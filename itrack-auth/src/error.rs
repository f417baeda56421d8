use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The vendor rejected the account or the signature.
    #[error("{0}")]
    Authentication(String),

    /// No vendor response was obtained (network failure, HTTP error, timeout).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<itrack_api::ItrackApiError> for AuthError {
    fn from(err: itrack_api::ItrackApiError) -> Self {
        AuthError::Transport(err.to_string())
    }
}
