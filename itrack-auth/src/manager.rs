use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itrack_api::Request;
use tokio::sync::RwLock;

use crate::credential::{Credential, SignedRequest};
use crate::error::AuthError;
use crate::token::{AuthToken, TokenState};

/// Token issued by a successful authorization round-trip.
pub struct Grant {
    pub access_token: String,
    pub expires_in: i64,
}

/// Performs the `/authorization` exchange.
///
/// Implemented for the HTTP client; tests substitute their own.
#[async_trait]
pub trait Authorize: Send + Sync {
    async fn authorize(&self, request: SignedRequest) -> Result<Grant, AuthError>;
}

#[async_trait]
impl Authorize for itrack_api::Client {
    async fn authorize(&self, request: SignedRequest) -> Result<Grant, AuthError> {
        let req = Request::authorization().sign(request.time, request.account, request.signature);
        let grant = self
            .send(req)
            .await?
            .into_record()
            .map_err(|failure| {
                AuthError::Authentication(failure.describe("Failed to get access token"))
            })?;

        Ok(Grant {
            access_token: grant.access_token,
            expires_in: grant.expires_in,
        })
    }
}

#[async_trait]
impl<T> Authorize for Arc<T>
where
    T: Authorize + ?Sized,
{
    async fn authorize(&self, request: SignedRequest) -> Result<Grant, AuthError> {
        (**self).authorize(request).await
    }
}

/// Owns the credential and the cached access token.
///
/// Readers share the cached token; a caller that finds it expired takes the
/// write lock and re-checks before authenticating, so concurrent callers
/// trigger a single refresh.
pub struct TokenManager<A> {
    credential: Credential,
    authorizer: A,
    cached: RwLock<Option<AuthToken>>,
}

impl<A> TokenManager<A>
where
    A: Authorize,
{
    pub fn new(credential: Credential, authorizer: A) -> Self {
        Self {
            credential,
            authorizer,
            cached: RwLock::new(None),
        }
    }

    pub fn account(&self) -> &str {
        self.credential.account()
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    pub async fn token(&self) -> Result<AuthToken, AuthError> {
        self.token_at(Utc::now()).await
    }

    /// Returns the cached token if it is still valid at `now`, otherwise
    /// authenticates once and caches the result.
    pub async fn token_at(&self, now: DateTime<Utc>) -> Result<AuthToken, AuthError> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_valid_at(now)) {
                return Ok(token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref().filter(|t| t.is_valid_at(now)) {
            return Ok(token.clone());
        }

        let token = self.authenticate(now).await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    pub async fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        TokenState::of(self.cached.read().await.as_ref(), now)
    }

    async fn authenticate(&self, now: DateTime<Utc>) -> Result<AuthToken, AuthError> {
        let request = self.credential.sign(now.timestamp());
        tracing::debug!(account = %self.credential.account(), time = request.time, "Requesting iTrack access token");

        let grant = match self.authorizer.authorize(request).await {
            Ok(grant) => grant,
            Err(e) => {
                tracing::warn!(account = %self.credential.account(), "iTrack authorization failed: {}", e);
                return Err(e);
            }
        };

        let expires_in = grant.expires_in;
        let token = AuthToken::new(grant.access_token, now, expires_in).ok_or_else(|| {
            tracing::warn!(expires_in, "iTrack returned an unusable token lifetime");
            AuthError::Authentication(format!(
                "Failed to get access token: invalid expires_in {}",
                expires_in
            ))
        })?;
        tracing::info!(
            expires_at = %token.expires_at(),
            refresh_at = %token.refresh_at(),
            "Obtained iTrack access token"
        );
        Ok(token)
    }
}
