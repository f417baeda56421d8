use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};

/// Account and password for one iTrack customer. Immutable once built.
#[derive(Debug)]
pub struct Credential {
    account: String,
    password: SecretString,
}

impl Credential {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Builds the authorization parameters for the given unix time.
    pub fn sign(&self, time: i64) -> SignedRequest {
        SignedRequest {
            time,
            account: self.account.clone(),
            signature: generate_signature(self.password.expose_secret(), time),
        }
    }
}

/// Parameters of one `/authorization` call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub time: i64,
    pub account: String,
    pub signature: String,
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("time", &self.time)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

/// `md5(md5(password) + time)`, both digests as lowercase hex and the
/// time as decimal unix seconds.
pub fn generate_signature(password: &str, time: i64) -> String {
    let first = format!("{:x}", Md5::digest(password.as_bytes()));
    format!("{:x}", Md5::digest(format!("{}{}", first, time).as_bytes()))
}
