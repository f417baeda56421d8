use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Tokens are treated as expired this long before the vendor says so.
pub const EXPIRY_MARGIN: Duration = Duration::seconds(1800);

/// Cached bearer token. The value only leaves this type to be embedded in
/// an outgoing request.
pub struct AuthToken {
    value: SecretString,
    obtained_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// `None` when `expires_in` is negative or too large to be an instant.
    pub fn new(
        value: impl Into<String>,
        obtained_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Option<Self> {
        if expires_in < 0 {
            return None;
        }
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime))?;
        Some(Self {
            value: SecretString::from(value.into()),
            obtained_at,
            expires_at,
        })
    }

    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Instant after which the token is no longer handed out.
    pub fn refresh_at(&self) -> DateTime<Utc> {
        self.expires_at - EXPIRY_MARGIN
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_at()
    }
}

impl Clone for AuthToken {
    fn clone(&self) -> Self {
        Self {
            value: SecretString::from(self.expose().to_owned()),
            obtained_at: self.obtained_at,
            expires_at: self.expires_at,
        }
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.value)
            .field("obtained_at", &self.obtained_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Valid,
    Expired,
}

impl TokenState {
    pub fn of(token: Option<&AuthToken>, now: DateTime<Utc>) -> Self {
        match token {
            None => TokenState::NoToken,
            Some(token) if token.is_valid_at(now) => TokenState::Valid,
            Some(_) => TokenState::Expired,
        }
    }
}
