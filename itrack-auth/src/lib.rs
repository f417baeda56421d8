//! Token lifecycle for the iTrack API: request signing, caching and
//! refresh of the short-lived access token.

mod credential;
mod error;
mod manager;
mod token;

pub use credential::{generate_signature, Credential, SignedRequest};
pub use error::AuthError;
pub use manager::{Authorize, Grant, TokenManager};
pub use token::{AuthToken, TokenState, EXPIRY_MARGIN};
