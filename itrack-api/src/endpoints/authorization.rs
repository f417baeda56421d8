use super::Envelope;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Requests

/// Signed credential exchange. `signature` is
/// `md5(md5(password) + time)` in lowercase hex.
#[derive(Debug, Clone, Serialize)]
pub struct Authorize {
    time: i64,
    account: String,
    signature: String,
}

impl Authorize {
    pub fn new(time: i64, account: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            time,
            account: account.into(),
            signature: signature.into(),
        }
    }
}

impl Request for Authorize {
    type Data = Self;
    type Response = AuthorizationResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/authorization".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

pub type AuthorizationResponse = Envelope<AccessGrant>;

#[derive(Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,
    /// Lifetime of the token in seconds.
    pub expires_in: i64,
}

impl std::fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGrant")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
